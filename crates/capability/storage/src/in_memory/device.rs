//! 设备内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 设备 CRUD 操作（绑定字段除外）
//! - 按站点外部标识过滤与计数

use super::{InMemoryStore, next_id};
use crate::error::StorageError;
use crate::models::{DeviceRecord, DeviceUpdate, NewDevice};
use crate::traits::DeviceStore;

#[async_trait::async_trait]
impl DeviceStore for InMemoryStore {
    async fn list_devices(
        &self,
        site_id: Option<&str>,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let data = self.inner.lock().await;
        let mut devices: Vec<DeviceRecord> = data
            .devices
            .values()
            .filter(|device| site_id.is_none_or(|site_id| device.site_id == site_id))
            .cloned()
            .collect();
        devices.sort_by_key(|device| device.id);
        Ok(devices)
    }

    async fn find_device(&self, id: i64) -> Result<Option<DeviceRecord>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data.devices.get(&id).cloned())
    }

    async fn create_device(&self, device: NewDevice) -> Result<DeviceRecord, StorageError> {
        let mut data = self.inner.lock().await;
        let id = next_id(&mut data.next_device_id);
        let record = DeviceRecord {
            id,
            site_id: String::new(),
            name: device.name,
            auth_service_remote_port: device.auth_service_remote_port,
            ssh_remote_port: device.ssh_remote_port,
            active: device.active,
        };
        data.devices.insert(id, record.clone());
        Ok(record)
    }

    async fn update_device(
        &self,
        id: i64,
        update: DeviceUpdate,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let mut data = self.inner.lock().await;
        let Some(device) = data.devices.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            device.name = name;
        }
        if let Some(port) = update.auth_service_remote_port {
            device.auth_service_remote_port = port;
        }
        if let Some(port) = update.ssh_remote_port {
            device.ssh_remote_port = port;
        }
        if let Some(active) = update.active {
            device.active = active;
        }
        Ok(Some(device.clone()))
    }

    async fn delete_device(&self, id: i64) -> Result<bool, StorageError> {
        let mut data = self.inner.lock().await;
        Ok(data.devices.remove(&id).is_some())
    }

    async fn count_devices_for_site(&self, site_id: &str) -> Result<u64, StorageError> {
        let data = self.inner.lock().await;
        let count = data
            .devices
            .values()
            .filter(|device| device.site_id == site_id)
            .count();
        Ok(count as u64)
    }
}
