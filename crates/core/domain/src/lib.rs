/// 管理员上下文：会话 token 验证通过后的身份，随请求传递给各 handler。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    pub admin_id: i64,
    pub username: String,
}

impl AdminContext {
    /// 构造显式身份的管理员上下文。
    pub fn new(admin_id: i64, username: impl Into<String>) -> Self {
        Self {
            admin_id,
            username: username.into(),
        }
    }
}
