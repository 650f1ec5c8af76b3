//! 录像机内存存储实现
//!
//! 仅用于本地演示和测试。

use super::{InMemoryStore, next_id};
use crate::error::StorageError;
use crate::models::{NewRecorder, RecorderRecord, RecorderUpdate};
use crate::traits::RecorderStore;

#[async_trait::async_trait]
impl RecorderStore for InMemoryStore {
    async fn list_recorders(&self) -> Result<Vec<RecorderRecord>, StorageError> {
        let data = self.inner.lock().await;
        let mut recorders: Vec<RecorderRecord> = data.recorders.values().cloned().collect();
        recorders.sort_by_key(|recorder| recorder.id);
        Ok(recorders)
    }

    async fn find_recorder(&self, id: i64) -> Result<Option<RecorderRecord>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data.recorders.get(&id).cloned())
    }

    async fn list_recorders_for_site(
        &self,
        site_id: i64,
    ) -> Result<Vec<RecorderRecord>, StorageError> {
        let data = self.inner.lock().await;
        let mut recorders: Vec<RecorderRecord> = data
            .recorders
            .values()
            .filter(|recorder| recorder.site_id == site_id)
            .cloned()
            .collect();
        recorders.sort_by_key(|recorder| recorder.id);
        Ok(recorders)
    }

    async fn create_recorder(
        &self,
        recorder: NewRecorder,
    ) -> Result<RecorderRecord, StorageError> {
        let mut data = self.inner.lock().await;
        let id = next_id(&mut data.next_recorder_id);
        let record = RecorderRecord {
            id,
            name: recorder.name,
            url: recorder.url,
            site_id: 0,
            admin_user: recorder.admin_user,
            users: recorder.users,
        };
        data.recorders.insert(id, record.clone());
        Ok(record)
    }

    async fn update_recorder(
        &self,
        id: i64,
        update: RecorderUpdate,
    ) -> Result<Option<RecorderRecord>, StorageError> {
        let mut data = self.inner.lock().await;
        let Some(recorder) = data.recorders.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            recorder.name = name;
        }
        if let Some(url) = update.url {
            recorder.url = url;
        }
        if let Some(admin_user) = update.admin_user {
            recorder.admin_user = admin_user;
        }
        if let Some(users) = update.users {
            recorder.users = users;
        }
        Ok(Some(recorder.clone()))
    }

    async fn delete_recorder(&self, id: i64) -> Result<bool, StorageError> {
        let mut data = self.inner.lock().await;
        Ok(data.recorders.remove(&id).is_some())
    }
}
