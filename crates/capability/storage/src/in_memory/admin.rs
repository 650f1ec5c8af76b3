//! 管理员内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 管理员查询与 CRUD
//! - 用户名唯一性校验
//! - 分页列表（按主键排序）

use super::{InMemoryStore, next_id};
use crate::error::StorageError;
use crate::models::{AdminRecord, AdminUpdate};
use crate::traits::AdminStore;

#[async_trait::async_trait]
impl AdminStore for InMemoryStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data
            .admins
            .values()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn find_admin(&self, admin_id: i64) -> Result<Option<AdminRecord>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data.admins.get(&admin_id).cloned())
    }

    async fn list_admins(
        &self,
        page_num: u32,
        page_size: u32,
        asc: bool,
    ) -> Result<(Vec<AdminRecord>, u64), StorageError> {
        let data = self.inner.lock().await;
        let mut admins: Vec<AdminRecord> = data.admins.values().cloned().collect();
        admins.sort_by_key(|admin| admin.admin_id);
        if !asc {
            admins.reverse();
        }
        let total = admins.len() as u64;
        let start = (page_num.saturating_sub(1) as usize) * page_size as usize;
        let page = admins
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminRecord, StorageError> {
        let mut data = self.inner.lock().await;
        if data.admins.values().any(|admin| admin.username == username) {
            return Err(StorageError::new("username exists"));
        }
        let admin_id = next_id(&mut data.next_admin_id);
        let record = AdminRecord {
            admin_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        data.admins.insert(admin_id, record.clone());
        Ok(record)
    }

    async fn update_admin(
        &self,
        admin_id: i64,
        update: AdminUpdate,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let mut data = self.inner.lock().await;
        if let Some(username) = update.username.as_deref() {
            let taken = data
                .admins
                .values()
                .any(|admin| admin.admin_id != admin_id && admin.username == username);
            if taken {
                return Err(StorageError::new("username exists"));
            }
        }
        let Some(admin) = data.admins.get_mut(&admin_id) else {
            return Ok(None);
        };
        if let Some(username) = update.username {
            admin.username = username;
        }
        if let Some(password_hash) = update.password_hash {
            admin.password_hash = password_hash;
        }
        Ok(Some(admin.clone()))
    }

    async fn delete_admin(&self, admin_id: i64) -> Result<bool, StorageError> {
        let mut data = self.inner.lock().await;
        Ok(data.admins.remove(&admin_id).is_some())
    }

    async fn update_password_hash(
        &self,
        admin_id: i64,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let mut data = self.inner.lock().await;
        let Some(admin) = data.admins.get_mut(&admin_id) else {
            return Ok(false);
        };
        admin.password_hash = password_hash.to_string();
        Ok(true)
    }

    async fn count_admins(&self) -> Result<u64, StorageError> {
        let data = self.inner.lock().await;
        Ok(data.admins.len() as u64)
    }
}
