//! Postgres 设备存储实现
//!
//! 绑定字段 `site_id` 不在此处写入（创建时固定为空串），
//! 由绑定事务维护。

use crate::error::StorageError;
use crate::models::{DeviceRecord, DeviceUpdate, NewDevice};
use crate::traits::DeviceStore;
use sqlx::{PgPool, Row};

pub struct PgDeviceStore {
    pool: PgPool,
}

impl PgDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_device(row: &sqlx::postgres::PgRow) -> Result<DeviceRecord, StorageError> {
    Ok(DeviceRecord {
        id: row.try_get("id")?,
        site_id: row.try_get("site_id")?,
        name: row.try_get("name")?,
        auth_service_remote_port: row.try_get("auth_service_remote_port")?,
        ssh_remote_port: row.try_get("ssh_remote_port")?,
        active: row.try_get("active")?,
    })
}

const DEVICE_COLUMNS: &str = "id, site_id, name, auth_service_remote_port, ssh_remote_port, active";

#[async_trait::async_trait]
impl DeviceStore for PgDeviceStore {
    async fn list_devices(
        &self,
        site_id: Option<&str>,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let rows = match site_id {
            Some(site_id) => {
                sqlx::query(&format!(
                    "select {DEVICE_COLUMNS} from devices where site_id = $1 order by id"
                ))
                .bind(site_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!("select {DEVICE_COLUMNS} from devices order by id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(row_to_device).collect()
    }

    async fn find_device(&self, id: i64) -> Result<Option<DeviceRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "select {DEVICE_COLUMNS} from devices where id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_device).transpose()
    }

    async fn create_device(&self, device: NewDevice) -> Result<DeviceRecord, StorageError> {
        let row = sqlx::query(&format!(
            "insert into devices (site_id, name, auth_service_remote_port, ssh_remote_port, active) \
             values ('', $1, $2, $3, $4) \
             returning {DEVICE_COLUMNS}"
        ))
        .bind(device.name)
        .bind(device.auth_service_remote_port)
        .bind(device.ssh_remote_port)
        .bind(device.active)
        .fetch_one(&self.pool)
        .await?;
        row_to_device(&row)
    }

    async fn update_device(
        &self,
        id: i64,
        update: DeviceUpdate,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "update devices set \
               name = coalesce($2, name), \
               auth_service_remote_port = coalesce($3, auth_service_remote_port), \
               ssh_remote_port = coalesce($4, ssh_remote_port), \
               active = coalesce($5, active) \
             where id = $1 \
             returning {DEVICE_COLUMNS}"
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.auth_service_remote_port)
        .bind(update.ssh_remote_port)
        .bind(update.active)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_device).transpose()
    }

    async fn delete_device(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from devices where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_devices_for_site(&self, site_id: &str) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("select count(*) from devices where site_id = $1")
            .bind(site_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}
