//! 绑定能力：设备/录像机与站点的绑定状态机。
//!
//! 一台设备同一时刻至多属于一个站点，一台录像机同一时刻至多属于
//! 一个站点。绑定关系的两个承载字段（设备的站点外部标识、录像机的
//! 站点数字主键）只由本引擎写入；每次状态迁移的全部读检查与单次
//! 写入在同一个存储事务内完成，写入前保证目标站点存在。
//!
//! 迁移语义：
//! - bind：已绑定到其他站点时拒绝（AlreadyBound），
//!   重复绑定到同一站点为幂等成功；
//! - unbind：未绑定时拒绝（NotBound）；
//! - rebind：管理员改绑操作，不做冲突保护，无条件覆盖当前归属
//!   （目标与当前相同时为幂等成功）。

use icctv_storage::{BindingStore, StorageError};
use std::sync::Arc;
use tracing::info;

/// 绑定操作错误。
///
/// 结构化的错误枚举同时被绑定引擎与请求处理层使用，
/// 调用方按变体分支，不做任何错误文本匹配。
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("site not found")]
    SiteNotFound,
    #[error("device not found")]
    DeviceNotFound,
    #[error("recorder not found")]
    RecorderNotFound,
    #[error("already bound to another site")]
    AlreadyBound,
    #[error("not bound to any site")]
    NotBound,
    #[error("site has no external id")]
    SiteMissingExternalId,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 绑定引擎。
pub struct BindingEngine {
    store: Arc<dyn BindingStore>,
}

impl BindingEngine {
    /// 创建绑定引擎实例。
    pub fn new(store: Arc<dyn BindingStore>) -> Self {
        Self { store }
    }

    /// 绑定设备到站点。
    ///
    /// 已绑定到其他站点时拒绝；已绑定到同一站点时幂等成功。
    pub async fn bind_device(&self, site_id: i64, device_id: i64) -> Result<(), BindingError> {
        let mut txn = self.store.begin().await?;
        let site = txn
            .get_site(site_id)
            .await?
            .ok_or(BindingError::SiteNotFound)?;
        if site.site_id.is_empty() {
            return Err(BindingError::SiteMissingExternalId);
        }
        let device = txn
            .get_device(device_id)
            .await?
            .ok_or(BindingError::DeviceNotFound)?;
        if !device.site_id.is_empty() && device.site_id != site.site_id {
            return Err(BindingError::AlreadyBound);
        }
        if device.site_id == site.site_id {
            return Ok(());
        }
        txn.save_device_site(device_id, &site.site_id).await?;
        txn.commit().await?;
        info!(device_id, site = %site.site_id, "device bound");
        Ok(())
    }

    /// 解绑设备。
    pub async fn unbind_device(&self, device_id: i64) -> Result<(), BindingError> {
        let mut txn = self.store.begin().await?;
        let device = txn
            .get_device(device_id)
            .await?
            .ok_or(BindingError::DeviceNotFound)?;
        if device.site_id.is_empty() {
            return Err(BindingError::NotBound);
        }
        txn.save_device_site(device_id, "").await?;
        txn.commit().await?;
        info!(device_id, "device unbound");
        Ok(())
    }

    /// 改绑设备到新站点（管理员覆盖操作，不检查当前归属）。
    pub async fn rebind_device(
        &self,
        device_id: i64,
        new_site_id: i64,
    ) -> Result<(), BindingError> {
        let mut txn = self.store.begin().await?;
        let site = txn
            .get_site(new_site_id)
            .await?
            .ok_or(BindingError::SiteNotFound)?;
        if site.site_id.is_empty() {
            return Err(BindingError::SiteMissingExternalId);
        }
        let device = txn
            .get_device(device_id)
            .await?
            .ok_or(BindingError::DeviceNotFound)?;
        if device.site_id == site.site_id {
            return Ok(());
        }
        txn.save_device_site(device_id, &site.site_id).await?;
        txn.commit().await?;
        info!(device_id, site = %site.site_id, "device rebound");
        Ok(())
    }

    /// 绑定录像机到站点。
    ///
    /// 已绑定到其他站点时拒绝；已绑定到同一站点时幂等成功。
    pub async fn bind_recorder(
        &self,
        site_id: i64,
        recorder_id: i64,
    ) -> Result<(), BindingError> {
        let mut txn = self.store.begin().await?;
        let site = txn
            .get_site(site_id)
            .await?
            .ok_or(BindingError::SiteNotFound)?;
        let recorder = txn
            .get_recorder(recorder_id)
            .await?
            .ok_or(BindingError::RecorderNotFound)?;
        if recorder.site_id != 0 && recorder.site_id != site.id {
            return Err(BindingError::AlreadyBound);
        }
        if recorder.site_id == site.id {
            return Ok(());
        }
        txn.save_recorder_site(recorder_id, site.id).await?;
        txn.commit().await?;
        info!(recorder_id, site_id = site.id, "recorder bound");
        Ok(())
    }

    /// 解绑录像机。
    pub async fn unbind_recorder(&self, recorder_id: i64) -> Result<(), BindingError> {
        let mut txn = self.store.begin().await?;
        let recorder = txn
            .get_recorder(recorder_id)
            .await?
            .ok_or(BindingError::RecorderNotFound)?;
        if recorder.site_id == 0 {
            return Err(BindingError::NotBound);
        }
        txn.save_recorder_site(recorder_id, 0).await?;
        txn.commit().await?;
        info!(recorder_id, "recorder unbound");
        Ok(())
    }

    /// 改绑录像机到新站点（管理员覆盖操作，不检查当前归属）。
    pub async fn rebind_recorder(
        &self,
        recorder_id: i64,
        new_site_id: i64,
    ) -> Result<(), BindingError> {
        let mut txn = self.store.begin().await?;
        let site = txn
            .get_site(new_site_id)
            .await?
            .ok_or(BindingError::SiteNotFound)?;
        let recorder = txn
            .get_recorder(recorder_id)
            .await?
            .ok_or(BindingError::RecorderNotFound)?;
        if recorder.site_id == site.id {
            return Ok(());
        }
        txn.save_recorder_site(recorder_id, site.id).await?;
        txn.commit().await?;
        info!(recorder_id, site_id = site.id, "recorder rebound");
        Ok(())
    }
}
