use async_trait::async_trait;
use icctv_remote::{
    PortUpdateRequest, RemoteClient, RemoteDeviceInfo, RemoteError, RemoteHealthStatus,
    RemotePortUpdate, RemoteService,
};
use icctv_storage::{DeviceStore, InMemoryStore, NewDevice, PublicNetStore};
use std::sync::{Arc, Mutex};

/// 录制请求地址的桩客户端。
struct StubClient {
    update_success: bool,
    seen_urls: Mutex<Vec<String>>,
}

impl StubClient {
    fn new(update_success: bool) -> Self {
        Self {
            update_success,
            seen_urls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, url: &str) {
        self.seen_urls
            .lock()
            .expect("uncontended in tests")
            .push(url.to_string());
    }
}

#[async_trait]
impl RemoteClient for StubClient {
    async fn update_ports(
        &self,
        url: &str,
        _request: &PortUpdateRequest,
    ) -> Result<RemotePortUpdate, RemoteError> {
        self.record(url);
        Ok(RemotePortUpdate {
            success: self.update_success,
            message: if self.update_success {
                "ok".to_string()
            } else {
                "port in use".to_string()
            },
            restarted: self.update_success,
        })
    }

    async fn fetch_device_info(&self, url: &str) -> Result<RemoteDeviceInfo, RemoteError> {
        self.record(url);
        Ok(RemoteDeviceInfo {
            device_id: "relay-1".to_string(),
            mediamtx_version: "1.9.0".to_string(),
            frpc_server: "1.2.3.4".to_string(),
            frpc_auth_remote_port: 18080,
            frpc_ssh_remote_port: 10022,
            available_channels: vec!["cam1".to_string()],
            status: "running".to_string(),
        })
    }

    async fn fetch_health(&self, url: &str) -> Result<RemoteHealthStatus, RemoteError> {
        self.record(url);
        Ok(RemoteHealthStatus {
            status: "healthy".to_string(),
            service: "icctv-device-agent".to_string(),
            docker_services: Default::default(),
            mediamtx_status: "running".to_string(),
            frpc_status: "running".to_string(),
        })
    }
}

async fn seed_device(store: &InMemoryStore) -> i64 {
    store
        .create_device(NewDevice {
            name: "relay-1".to_string(),
            auth_service_remote_port: 18080,
            ssh_remote_port: 10022,
            active: true,
        })
        .await
        .expect("device")
        .id
}

fn service(store: Arc<InMemoryStore>, client: Arc<StubClient>) -> RemoteService {
    RemoteService::new(store.clone(), store, client)
}

#[tokio::test]
async fn update_ports_persists_on_remote_success() {
    let store = Arc::new(InMemoryStore::new());
    let device_id = seed_device(&store).await;
    store.upsert_public_net("1.2.3.4").await.expect("config");
    let client = Arc::new(StubClient::new(true));
    let service = service(store.clone(), client.clone());

    let result = service
        .update_ports(device_id, 10023, 18081)
        .await
        .expect("update");
    assert!(result.success);

    // 地址由公网 IP + 设备认证服务端口拼出
    let urls = client.seen_urls.lock().expect("urls");
    assert_eq!(urls[0], "http://1.2.3.4:18080/api/device/frpc/ports");

    let device = store
        .find_device(device_id)
        .await
        .expect("query")
        .expect("device");
    assert_eq!(device.ssh_remote_port, 10023);
    assert_eq!(device.auth_service_remote_port, 18081);
}

#[tokio::test]
async fn update_ports_keeps_local_record_on_remote_refusal() {
    let store = Arc::new(InMemoryStore::new());
    let device_id = seed_device(&store).await;
    store.upsert_public_net("1.2.3.4").await.expect("config");
    let service = service(store.clone(), Arc::new(StubClient::new(false)));

    let result = service
        .update_ports(device_id, 10023, 18081)
        .await
        .expect("update");
    assert!(!result.success);

    let device = store
        .find_device(device_id)
        .await
        .expect("query")
        .expect("device");
    assert_eq!(device.ssh_remote_port, 10022);
    assert_eq!(device.auth_service_remote_port, 18080);
}

#[tokio::test]
async fn missing_public_net_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let device_id = seed_device(&store).await;
    let service = service(store, Arc::new(StubClient::new(true)));

    assert!(matches!(
        service.device_info(device_id).await,
        Err(RemoteError::PublicNetMissing)
    ));
}

#[tokio::test]
async fn missing_device_rejected() {
    let store = Arc::new(InMemoryStore::new());
    store.upsert_public_net("1.2.3.4").await.expect("config");
    let service = service(store, Arc::new(StubClient::new(true)));

    assert!(matches!(
        service.health_check(99).await,
        Err(RemoteError::DeviceNotFound)
    ));
}

#[tokio::test]
async fn info_and_health_use_expected_paths() {
    let store = Arc::new(InMemoryStore::new());
    let device_id = seed_device(&store).await;
    store.upsert_public_net("1.2.3.4").await.expect("config");
    let client = Arc::new(StubClient::new(true));
    let service = service(store, client.clone());

    service.device_info(device_id).await.expect("info");
    service.health_check(device_id).await.expect("health");

    let urls = client.seen_urls.lock().expect("urls");
    assert_eq!(urls[0], "http://1.2.3.4:18080/api/device/info");
    assert_eq!(urls[1], "http://1.2.3.4:18080/health");
}
