//! Postgres 绑定事务实现
//!
//! 一次绑定迁移的读检查与写入在同一个数据库事务内执行；
//! 目标设备/录像机行以 `select … for update` 锁定，
//! 两个并发迁移不可能同时观察到"未绑定"后各自写入。
//! 事务被丢弃（未 commit）时由 sqlx 回滚。

use crate::error::StorageError;
use crate::models::{DeviceRecord, RecorderRecord, SiteRecord};
use crate::postgres::device::row_to_device;
use crate::postgres::recorder::row_to_recorder;
use crate::postgres::site::row_to_site;
use crate::traits::{BindingStore, BindingTxn};
use sqlx::{PgPool, Postgres, Transaction};

pub struct PgBindingStore {
    pool: PgPool,
}

impl PgBindingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Postgres 绑定事务。
pub struct PgBindingTxn {
    txn: Transaction<'static, Postgres>,
}

#[async_trait::async_trait]
impl BindingTxn for PgBindingTxn {
    async fn get_site(&mut self, site_id: i64) -> Result<Option<SiteRecord>, StorageError> {
        let row = sqlx::query("select id, site_id, name, remark from sites where id = $1")
            .bind(site_id)
            .fetch_optional(&mut *self.txn)
            .await?;
        row.as_ref().map(row_to_site).transpose()
    }

    async fn get_device(
        &mut self,
        device_id: i64,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let row = sqlx::query(
            "select id, site_id, name, auth_service_remote_port, ssh_remote_port, active \
             from devices where id = $1 for update",
        )
        .bind(device_id)
        .fetch_optional(&mut *self.txn)
        .await?;
        row.as_ref().map(row_to_device).transpose()
    }

    async fn get_recorder(
        &mut self,
        recorder_id: i64,
    ) -> Result<Option<RecorderRecord>, StorageError> {
        let row = sqlx::query(
            "select id, name, url, site_id, admin_user, users \
             from recorders where id = $1 for update",
        )
        .bind(recorder_id)
        .fetch_optional(&mut *self.txn)
        .await?;
        row.as_ref().map(row_to_recorder).transpose()
    }

    async fn save_device_site(
        &mut self,
        device_id: i64,
        site_id: &str,
    ) -> Result<(), StorageError> {
        let result = sqlx::query("update devices set site_id = $2 where id = $1")
            .bind(device_id)
            .bind(site_id)
            .execute(&mut *self.txn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::new("device missing"));
        }
        Ok(())
    }

    async fn save_recorder_site(
        &mut self,
        recorder_id: i64,
        site_id: i64,
    ) -> Result<(), StorageError> {
        let result = sqlx::query("update recorders set site_id = $2 where id = $1")
            .bind(recorder_id)
            .bind(site_id)
            .execute(&mut *self.txn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::new("recorder missing"));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        self.txn.commit().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BindingStore for PgBindingStore {
    async fn begin(&self) -> Result<Box<dyn BindingTxn>, StorageError> {
        let txn = self.pool.begin().await?;
        Ok(Box::new(PgBindingTxn { txn }))
    }
}
