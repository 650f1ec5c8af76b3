//! Postgres 管理员存储实现
//!
//! 设计要点：
//! - 删除为软删除：`deleted_at` 置位，所有读取过滤已删除行
//! - 用户名唯一索引建立在未删除行上（部分索引）

use crate::error::StorageError;
use crate::models::{AdminRecord, AdminUpdate};
use crate::traits::AdminStore;
use sqlx::{PgPool, Row};

pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_admin(row: &sqlx::postgres::PgRow) -> Result<AdminRecord, StorageError> {
    Ok(AdminRecord {
        admin_id: row.try_get("admin_id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
    })
}

#[async_trait::async_trait]
impl AdminStore for PgAdminStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let row = sqlx::query(
            "select admin_id, username, password_hash \
             from admins where username = $1 and deleted_at is null",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_admin).transpose()
    }

    async fn find_admin(&self, admin_id: i64) -> Result<Option<AdminRecord>, StorageError> {
        let row = sqlx::query(
            "select admin_id, username, password_hash \
             from admins where admin_id = $1 and deleted_at is null",
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_admin).transpose()
    }

    async fn list_admins(
        &self,
        page_num: u32,
        page_size: u32,
        asc: bool,
    ) -> Result<(Vec<AdminRecord>, u64), StorageError> {
        let total: i64 = sqlx::query_scalar("select count(*) from admins where deleted_at is null")
            .fetch_one(&self.pool)
            .await?;

        let order = if asc { "asc" } else { "desc" };
        let query = format!(
            "select admin_id, username, password_hash \
             from admins where deleted_at is null \
             order by admin_id {order} offset $1 limit $2"
        );
        let offset = i64::from(page_num.saturating_sub(1)) * i64::from(page_size);
        let rows = sqlx::query(&query)
            .bind(offset)
            .bind(i64::from(page_size))
            .fetch_all(&self.pool)
            .await?;

        let admins = rows
            .iter()
            .map(row_to_admin)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((admins, total as u64))
    }

    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminRecord, StorageError> {
        let row = sqlx::query(
            "insert into admins (username, password_hash) values ($1, $2) \
             returning admin_id, username, password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        row_to_admin(&row)
    }

    async fn update_admin(
        &self,
        admin_id: i64,
        update: AdminUpdate,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let row = sqlx::query(
            "update admins set \
               username = coalesce($2, username), \
               password_hash = coalesce($3, password_hash) \
             where admin_id = $1 and deleted_at is null \
             returning admin_id, username, password_hash",
        )
        .bind(admin_id)
        .bind(update.username)
        .bind(update.password_hash)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_admin).transpose()
    }

    async fn delete_admin(&self, admin_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "update admins set deleted_at = now() \
             where admin_id = $1 and deleted_at is null",
        )
        .bind(admin_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_password_hash(
        &self,
        admin_id: i64,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "update admins set password_hash = $2 \
             where admin_id = $1 and deleted_at is null",
        )
        .bind(admin_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_admins(&self) -> Result<u64, StorageError> {
        let total: i64 = sqlx::query_scalar("select count(*) from admins where deleted_at is null")
            .fetch_one(&self.pool)
            .await?;
        Ok(total as u64)
    }
}
