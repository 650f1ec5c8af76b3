use crate::{AuthError, password::hash_password};
use icctv_storage::{AdminRecord, AdminStore};

/// 默认管理员用户名。
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// 默认管理员口令（仅在空库初始化时写入，以 argon2 哈希存储）。
const DEFAULT_ADMIN_PASSWORD: &str = "123456";

/// 管理员表为空时创建默认账户。
///
/// 返回新建的记录；已有任何管理员时返回 None。
pub async fn ensure_default_admin(
    admin_store: &dyn AdminStore,
) -> Result<Option<AdminRecord>, AuthError> {
    if admin_store.count_admins().await? > 0 {
        return Ok(None);
    }
    let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    let admin = admin_store
        .create_admin(DEFAULT_ADMIN_USERNAME, &password_hash)
        .await?;
    Ok(Some(admin))
}
