//! 站点内存存储实现
//!
//! 仅用于本地演示和测试。

use super::{InMemoryStore, next_id};
use crate::error::StorageError;
use crate::models::{NewSite, SiteRecord, SiteUpdate};
use crate::traits::SiteStore;

#[async_trait::async_trait]
impl SiteStore for InMemoryStore {
    async fn list_sites(&self) -> Result<Vec<SiteRecord>, StorageError> {
        let data = self.inner.lock().await;
        let mut sites: Vec<SiteRecord> = data.sites.values().cloned().collect();
        sites.sort_by_key(|site| site.id);
        Ok(sites)
    }

    async fn find_site(&self, id: i64) -> Result<Option<SiteRecord>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data.sites.get(&id).cloned())
    }

    async fn find_site_by_external_id(
        &self,
        site_id: &str,
    ) -> Result<Option<SiteRecord>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data
            .sites
            .values()
            .find(|site| site.site_id == site_id)
            .cloned())
    }

    async fn create_site(&self, site: NewSite) -> Result<SiteRecord, StorageError> {
        let mut data = self.inner.lock().await;
        let id = next_id(&mut data.next_site_id);
        let record = SiteRecord {
            id,
            site_id: site.site_id,
            name: site.name,
            remark: site.remark,
        };
        data.sites.insert(id, record.clone());
        Ok(record)
    }

    async fn update_site(
        &self,
        id: i64,
        update: SiteUpdate,
    ) -> Result<Option<SiteRecord>, StorageError> {
        let mut data = self.inner.lock().await;
        let Some(site) = data.sites.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(site_id) = update.site_id {
            site.site_id = site_id;
        }
        if let Some(name) = update.name {
            site.name = name;
        }
        if let Some(remark) = update.remark {
            site.remark = remark;
        }
        Ok(Some(site.clone()))
    }

    async fn delete_site(&self, id: i64) -> Result<bool, StorageError> {
        let mut data = self.inner.lock().await;
        Ok(data.sites.remove(&id).is_some())
    }
}
