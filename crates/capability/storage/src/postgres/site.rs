//! Postgres 站点存储实现

use crate::error::StorageError;
use crate::models::{NewSite, SiteRecord, SiteUpdate};
use crate::traits::SiteStore;
use sqlx::{PgPool, Row};

pub struct PgSiteStore {
    pool: PgPool,
}

impl PgSiteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_site(row: &sqlx::postgres::PgRow) -> Result<SiteRecord, StorageError> {
    Ok(SiteRecord {
        id: row.try_get("id")?,
        site_id: row.try_get("site_id")?,
        name: row.try_get("name")?,
        remark: row.try_get("remark")?,
    })
}

#[async_trait::async_trait]
impl SiteStore for PgSiteStore {
    async fn list_sites(&self) -> Result<Vec<SiteRecord>, StorageError> {
        let rows = sqlx::query("select id, site_id, name, remark from sites order by id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_site).collect()
    }

    async fn find_site(&self, id: i64) -> Result<Option<SiteRecord>, StorageError> {
        let row = sqlx::query("select id, site_id, name, remark from sites where id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_site).transpose()
    }

    async fn find_site_by_external_id(
        &self,
        site_id: &str,
    ) -> Result<Option<SiteRecord>, StorageError> {
        let row = sqlx::query("select id, site_id, name, remark from sites where site_id = $1")
            .bind(site_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_site).transpose()
    }

    async fn create_site(&self, site: NewSite) -> Result<SiteRecord, StorageError> {
        let row = sqlx::query(
            "insert into sites (site_id, name, remark) values ($1, $2, $3) \
             returning id, site_id, name, remark",
        )
        .bind(site.site_id)
        .bind(site.name)
        .bind(site.remark)
        .fetch_one(&self.pool)
        .await?;
        row_to_site(&row)
    }

    async fn update_site(
        &self,
        id: i64,
        update: SiteUpdate,
    ) -> Result<Option<SiteRecord>, StorageError> {
        let row = sqlx::query(
            "update sites set \
               site_id = coalesce($2, site_id), \
               name = coalesce($3, name), \
               remark = coalesce($4, remark) \
             where id = $1 \
             returning id, site_id, name, remark",
        )
        .bind(id)
        .bind(update.site_id)
        .bind(update.name)
        .bind(update.remark)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_site).transpose()
    }

    async fn delete_site(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from sites where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
