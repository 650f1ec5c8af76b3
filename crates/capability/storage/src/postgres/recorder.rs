//! Postgres 录像机存储实现
//!
//! 凭证字段（admin_user / users）以 JSON 文本列存储，
//! 读写时经 serde_json 编解码。

use crate::error::StorageError;
use crate::models::{NewRecorder, RecorderCredential, RecorderRecord, RecorderUpdate};
use crate::traits::RecorderStore;
use sqlx::{PgPool, Row};

pub struct PgRecorderStore {
    pool: PgPool,
}

impl PgRecorderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_recorder(
    row: &sqlx::postgres::PgRow,
) -> Result<RecorderRecord, StorageError> {
    let admin_user: String = row.try_get("admin_user")?;
    let users: String = row.try_get("users")?;
    Ok(RecorderRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        url: row.try_get("url")?,
        site_id: row.try_get("site_id")?,
        admin_user: serde_json::from_str::<RecorderCredential>(&admin_user)?,
        users: serde_json::from_str::<Vec<RecorderCredential>>(&users)?,
    })
}

const RECORDER_COLUMNS: &str = "id, name, url, site_id, admin_user, users";

#[async_trait::async_trait]
impl RecorderStore for PgRecorderStore {
    async fn list_recorders(&self) -> Result<Vec<RecorderRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "select {RECORDER_COLUMNS} from recorders order by id"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_recorder).collect()
    }

    async fn find_recorder(&self, id: i64) -> Result<Option<RecorderRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "select {RECORDER_COLUMNS} from recorders where id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_recorder).transpose()
    }

    async fn list_recorders_for_site(
        &self,
        site_id: i64,
    ) -> Result<Vec<RecorderRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "select {RECORDER_COLUMNS} from recorders where site_id = $1 order by id"
        ))
        .bind(site_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_recorder).collect()
    }

    async fn create_recorder(
        &self,
        recorder: NewRecorder,
    ) -> Result<RecorderRecord, StorageError> {
        let admin_user = serde_json::to_string(&recorder.admin_user)?;
        let users = serde_json::to_string(&recorder.users)?;
        let row = sqlx::query(&format!(
            "insert into recorders (name, url, site_id, admin_user, users) \
             values ($1, $2, 0, $3, $4) \
             returning {RECORDER_COLUMNS}"
        ))
        .bind(recorder.name)
        .bind(recorder.url)
        .bind(admin_user)
        .bind(users)
        .fetch_one(&self.pool)
        .await?;
        row_to_recorder(&row)
    }

    async fn update_recorder(
        &self,
        id: i64,
        update: RecorderUpdate,
    ) -> Result<Option<RecorderRecord>, StorageError> {
        let admin_user = update
            .admin_user
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let users = update.users.as_ref().map(serde_json::to_string).transpose()?;
        let row = sqlx::query(&format!(
            "update recorders set \
               name = coalesce($2, name), \
               url = coalesce($3, url), \
               admin_user = coalesce($4, admin_user), \
               users = coalesce($5, users) \
             where id = $1 \
             returning {RECORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.url)
        .bind(admin_user)
        .bind(users)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_recorder).transpose()
    }

    async fn delete_recorder(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from recorders where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
