//! 绑定事务内存实现
//!
//! 仅用于本地演示和测试。
//!
//! 事务持有整个图数据的异步互斥锁，因此同一时刻只有一次绑定迁移在
//! 进行，读检查与写入天然原子。写入先暂存，commit 时统一生效；
//! 事务被丢弃时暂存写入随之丢弃（回滚）。

use super::{GraphData, InMemoryStore};
use crate::error::StorageError;
use crate::models::{DeviceRecord, RecorderRecord, SiteRecord};
use crate::traits::{BindingStore, BindingTxn};
use tokio::sync::OwnedMutexGuard;

/// 内存绑定事务。
pub struct InMemoryBindingTxn {
    guard: OwnedMutexGuard<GraphData>,
    staged_device_sites: Vec<(i64, String)>,
    staged_recorder_sites: Vec<(i64, i64)>,
}

#[async_trait::async_trait]
impl BindingTxn for InMemoryBindingTxn {
    async fn get_site(&mut self, site_id: i64) -> Result<Option<SiteRecord>, StorageError> {
        Ok(self.guard.sites.get(&site_id).cloned())
    }

    async fn get_device(
        &mut self,
        device_id: i64,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        Ok(self.guard.devices.get(&device_id).cloned())
    }

    async fn get_recorder(
        &mut self,
        recorder_id: i64,
    ) -> Result<Option<RecorderRecord>, StorageError> {
        Ok(self.guard.recorders.get(&recorder_id).cloned())
    }

    async fn save_device_site(
        &mut self,
        device_id: i64,
        site_id: &str,
    ) -> Result<(), StorageError> {
        if !self.guard.devices.contains_key(&device_id) {
            return Err(StorageError::new("device missing"));
        }
        self.staged_device_sites
            .push((device_id, site_id.to_string()));
        Ok(())
    }

    async fn save_recorder_site(
        &mut self,
        recorder_id: i64,
        site_id: i64,
    ) -> Result<(), StorageError> {
        if !self.guard.recorders.contains_key(&recorder_id) {
            return Err(StorageError::new("recorder missing"));
        }
        self.staged_recorder_sites.push((recorder_id, site_id));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let Self {
            mut guard,
            staged_device_sites,
            staged_recorder_sites,
        } = *self;
        for (device_id, site_id) in staged_device_sites {
            if let Some(device) = guard.devices.get_mut(&device_id) {
                device.site_id = site_id;
            }
        }
        for (recorder_id, site_id) in staged_recorder_sites {
            if let Some(recorder) = guard.recorders.get_mut(&recorder_id) {
                recorder.site_id = site_id;
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BindingStore for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn BindingTxn>, StorageError> {
        let guard = self.inner.clone().lock_owned().await;
        Ok(Box::new(InMemoryBindingTxn {
            guard,
            staged_device_sites: Vec::new(),
            staged_recorder_sites: Vec::new(),
        }))
    }
}
