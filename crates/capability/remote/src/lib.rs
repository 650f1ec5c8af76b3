//! 远程控制能力：代理调用设备侧 agent。
//!
//! 设备经隧道暴露在公网 IP 的转发端口上，管理端通过
//! `http://{external_ip}:{auth_service_remote_port}` 访问设备侧 agent：
//! - 更新转发端口（远程成功后回写本地记录）
//! - 获取设备信息
//! - 健康检查
//!
//! 不做内部重试，失败原样返回调用方。

use async_trait::async_trait;
use icctv_storage::{DeviceRecord, DeviceStore, DeviceUpdate, PublicNetStore, StorageError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 各远程调用的超时。端口更新涉及设备侧服务重启，给更长时间。
const UPDATE_PORTS_TIMEOUT: Duration = Duration::from_secs(30);
const DEVICE_INFO_TIMEOUT: Duration = Duration::from_secs(15);
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// 远程控制错误。
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("device not found")]
    DeviceNotFound,
    #[error("public network configuration not found")]
    PublicNetMissing,
    #[error("failed to connect to remote device: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("internal error: {0}")]
    Internal(String),
}

/// 端口更新请求体（设备侧 agent 的线上格式）。
#[derive(Debug, Clone, Serialize)]
pub struct PortUpdateRequest {
    pub orangepi_ssh_remote_port: i32,
    pub icctv_orangepi_auth_remote_port: i32,
}

/// 端口更新结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePortUpdate {
    pub success: bool,
    pub message: String,
    pub restarted: bool,
}

/// 远程设备信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDeviceInfo {
    pub device_id: String,
    pub mediamtx_version: String,
    pub frpc_server: String,
    pub frpc_auth_remote_port: i32,
    pub frpc_ssh_remote_port: i32,
    pub available_channels: Vec<String>,
    pub status: String,
}

/// 远程健康状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteHealthStatus {
    pub status: String,
    pub service: String,
    pub docker_services: std::collections::HashMap<String, bool>,
    pub mediamtx_status: String,
    pub frpc_status: String,
}

/// 远程调用客户端抽象。
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn update_ports(
        &self,
        url: &str,
        request: &PortUpdateRequest,
    ) -> Result<RemotePortUpdate, RemoteError>;

    async fn fetch_device_info(&self, url: &str) -> Result<RemoteDeviceInfo, RemoteError>;

    async fn fetch_health(&self, url: &str) -> Result<RemoteHealthStatus, RemoteError>;
}

/// 基于 reqwest 的客户端实现。
pub struct HttpRemoteClient {
    client: reqwest::Client,
}

impl HttpRemoteClient {
    /// 创建 HTTP 客户端。
    pub fn new() -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| RemoteError::Internal(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn update_ports(
        &self,
        url: &str,
        request: &PortUpdateRequest,
    ) -> Result<RemotePortUpdate, RemoteError> {
        let response = self
            .client
            .post(url)
            .timeout(UPDATE_PORTS_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        response
            .json()
            .await
            .map_err(|err| RemoteError::Decode(err.to_string()))
    }

    async fn fetch_device_info(&self, url: &str) -> Result<RemoteDeviceInfo, RemoteError> {
        let response = self
            .client
            .get(url)
            .timeout(DEVICE_INFO_TIMEOUT)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        response
            .json()
            .await
            .map_err(|err| RemoteError::Decode(err.to_string()))
    }

    async fn fetch_health(&self, url: &str) -> Result<RemoteHealthStatus, RemoteError> {
        let response = self
            .client
            .get(url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        response
            .json()
            .await
            .map_err(|err| RemoteError::Decode(err.to_string()))
    }
}

/// 远程控制服务：查设备与公网配置、拼装地址、转发调用。
pub struct RemoteService {
    device_store: Arc<dyn DeviceStore>,
    public_net_store: Arc<dyn PublicNetStore>,
    client: Arc<dyn RemoteClient>,
}

impl RemoteService {
    /// 创建远程控制服务实例。
    pub fn new(
        device_store: Arc<dyn DeviceStore>,
        public_net_store: Arc<dyn PublicNetStore>,
        client: Arc<dyn RemoteClient>,
    ) -> Self {
        Self {
            device_store,
            public_net_store,
            client,
        }
    }

    /// 拼装设备侧 agent 的访问地址。
    async fn endpoint(&self, device: &DeviceRecord, path: &str) -> Result<String, RemoteError> {
        let config = self
            .public_net_store
            .get_public_net()
            .await?
            .ok_or(RemoteError::PublicNetMissing)?;
        Ok(format!(
            "http://{}:{}{}",
            config.external_ip, device.auth_service_remote_port, path
        ))
    }

    async fn find_device(&self, device_id: i64) -> Result<DeviceRecord, RemoteError> {
        self.device_store
            .find_device(device_id)
            .await?
            .ok_or(RemoteError::DeviceNotFound)
    }

    /// 远程更新设备转发端口，远程成功后回写本地记录。
    pub async fn update_ports(
        &self,
        device_id: i64,
        ssh_port: i32,
        auth_port: i32,
    ) -> Result<RemotePortUpdate, RemoteError> {
        let device = self.find_device(device_id).await?;
        let url = self.endpoint(&device, "/api/device/frpc/ports").await?;
        let request = PortUpdateRequest {
            orangepi_ssh_remote_port: ssh_port,
            icctv_orangepi_auth_remote_port: auth_port,
        };
        let result = self.client.update_ports(&url, &request).await?;

        if result.success {
            self.device_store
                .update_device(
                    device_id,
                    DeviceUpdate {
                        name: None,
                        auth_service_remote_port: Some(auth_port),
                        ssh_remote_port: Some(ssh_port),
                        active: None,
                    },
                )
                .await?;
            info!(device_id, ssh_port, auth_port, "device ports updated");
        } else {
            warn!(device_id, message = %result.message, "remote port update refused");
        }
        Ok(result)
    }

    /// 远程获取设备信息。
    pub async fn device_info(&self, device_id: i64) -> Result<RemoteDeviceInfo, RemoteError> {
        let device = self.find_device(device_id).await?;
        let url = self.endpoint(&device, "/api/device/info").await?;
        self.client.fetch_device_info(&url).await
    }

    /// 远程健康检查。
    pub async fn health_check(&self, device_id: i64) -> Result<RemoteHealthStatus, RemoteError> {
        let device = self.find_device(device_id).await?;
        let url = self.endpoint(&device, "/health").await?;
        self.client.fetch_health(&url).await
    }
}
