//! Postgres 公网配置存储实现
//!
//! 全局单条记录：读取取最早一行，更新时不存在则插入。

use crate::error::StorageError;
use crate::models::PublicNetRecord;
use crate::traits::PublicNetStore;
use sqlx::{PgPool, Row};

pub struct PgPublicNetStore {
    pool: PgPool,
}

impl PgPublicNetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_public_net(row: &sqlx::postgres::PgRow) -> Result<PublicNetRecord, StorageError> {
    Ok(PublicNetRecord {
        id: row.try_get("id")?,
        external_ip: row.try_get("external_ip")?,
    })
}

#[async_trait::async_trait]
impl PublicNetStore for PgPublicNetStore {
    async fn get_public_net(&self) -> Result<Option<PublicNetRecord>, StorageError> {
        let row = sqlx::query("select id, external_ip from public_net order by id limit 1")
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_public_net).transpose()
    }

    async fn upsert_public_net(
        &self,
        external_ip: &str,
    ) -> Result<PublicNetRecord, StorageError> {
        let existing = self.get_public_net().await?;
        let row = match existing {
            Some(record) => {
                sqlx::query(
                    "update public_net set external_ip = $2 where id = $1 \
                     returning id, external_ip",
                )
                .bind(record.id)
                .bind(external_ip)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "insert into public_net (external_ip) values ($1) \
                     returning id, external_ip",
                )
                .bind(external_ip)
                .fetch_one(&self.pool)
                .await?
            }
        };
        row_to_public_net(&row)
    }
}
