use icctv_binding::{BindingEngine, BindingError};
use icctv_storage::{
    DeviceStore, InMemoryStore, NewDevice, NewRecorder, NewSite, RecorderCredential,
    RecorderStore, SiteStore,
};
use std::sync::Arc;

struct Fixture {
    store: Arc<InMemoryStore>,
    engine: BindingEngine,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let engine = BindingEngine::new(store.clone());
        Self { store, engine }
    }

    async fn site(&self, site_id: &str) -> i64 {
        self.store
            .create_site(NewSite {
                site_id: site_id.to_string(),
                name: format!("site {site_id}"),
                remark: String::new(),
            })
            .await
            .expect("site")
            .id
    }

    async fn device(&self) -> i64 {
        self.store
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

    async fn recorder(&self) -> i64 {
        self.store
            .create_recorder(NewRecorder {
                name: "nvr-1".to_string(),
                url: "192.168.1.50:8000".to_string(),
                admin_user: RecorderCredential {
                    name: "admin".to_string(),
                    password: "nvr-pass".to_string(),
                },
                users: Vec::new(),
            })
            .await
            .expect("recorder")
            .id
    }

    async fn device_site(&self, device_id: i64) -> String {
        self.store
            .find_device(device_id)
            .await
            .expect("query")
            .expect("device")
            .site_id
    }

    async fn recorder_site(&self, recorder_id: i64) -> i64 {
        self.store
            .find_recorder(recorder_id)
            .await
            .expect("query")
            .expect("recorder")
            .site_id
    }
}

#[tokio::test]
async fn bind_unbind_lifecycle() {
    let fx = Fixture::new();
    let site_a = fx.site("B-100").await;
    let site_b = fx.site("B-200").await;
    let device = fx.device().await;

    // 绑定成功，设备记录携带站点外部标识
    fx.engine.bind_device(site_a, device).await.expect("bind");
    assert_eq!(fx.device_site(device).await, "B-100");

    // 绑定到另一站点被拒绝，归属不变
    assert!(matches!(
        fx.engine.bind_device(site_b, device).await,
        Err(BindingError::AlreadyBound)
    ));
    assert_eq!(fx.device_site(device).await, "B-100");

    // 解绑清空归属
    fx.engine.unbind_device(device).await.expect("unbind");
    assert_eq!(fx.device_site(device).await, "");

    // 再次解绑被拒绝
    assert!(matches!(
        fx.engine.unbind_device(device).await,
        Err(BindingError::NotBound)
    ));
}

#[tokio::test]
async fn bind_is_idempotent() {
    let fx = Fixture::new();
    let site = fx.site("B-100").await;
    let device = fx.device().await;

    fx.engine.bind_device(site, device).await.expect("bind");
    fx.engine.bind_device(site, device).await.expect("bind again");
    assert_eq!(fx.device_site(device).await, "B-100");
}

#[tokio::test]
async fn bind_lookup_failures() {
    let fx = Fixture::new();
    let site = fx.site("B-100").await;
    let device = fx.device().await;

    assert!(matches!(
        fx.engine.bind_device(99, device).await,
        Err(BindingError::SiteNotFound)
    ));
    assert!(matches!(
        fx.engine.bind_device(site, 99).await,
        Err(BindingError::DeviceNotFound)
    ));
    assert!(matches!(
        fx.engine.unbind_device(99).await,
        Err(BindingError::DeviceNotFound)
    ));
}

#[tokio::test]
async fn bind_requires_site_external_id() {
    let fx = Fixture::new();
    let site = fx.site("").await;
    let device = fx.device().await;

    assert!(matches!(
        fx.engine.bind_device(site, device).await,
        Err(BindingError::SiteMissingExternalId)
    ));
    assert_eq!(fx.device_site(device).await, "");
}

#[tokio::test]
async fn rebind_overrides_existing_binding() {
    let fx = Fixture::new();
    let site_a = fx.site("B-100").await;
    let site_b = fx.site("B-200").await;
    let device = fx.device().await;

    fx.engine.bind_device(site_a, device).await.expect("bind");

    // 改绑不做冲突保护，直接覆盖
    fx.engine
        .rebind_device(device, site_b)
        .await
        .expect("rebind");
    assert_eq!(fx.device_site(device).await, "B-200");

    // 改绑到当前站点幂等成功
    fx.engine
        .rebind_device(device, site_b)
        .await
        .expect("rebind same");
    assert_eq!(fx.device_site(device).await, "B-200");
}

#[tokio::test]
async fn rebind_lookup_failures() {
    let fx = Fixture::new();
    let site = fx.site("B-100").await;
    let empty_site = fx.site("").await;
    let device = fx.device().await;

    assert!(matches!(
        fx.engine.rebind_device(device, 99).await,
        Err(BindingError::SiteNotFound)
    ));
    assert!(matches!(
        fx.engine.rebind_device(99, site).await,
        Err(BindingError::DeviceNotFound)
    ));
    assert!(matches!(
        fx.engine.rebind_device(device, empty_site).await,
        Err(BindingError::SiteMissingExternalId)
    ));
}

#[tokio::test]
async fn recorder_bind_unbind_lifecycle() {
    let fx = Fixture::new();
    let site_a = fx.site("B-100").await;
    let site_b = fx.site("B-200").await;
    let recorder = fx.recorder().await;

    fx.engine
        .bind_recorder(site_a, recorder)
        .await
        .expect("bind");
    assert_eq!(fx.recorder_site(recorder).await, site_a);

    // 幂等
    fx.engine
        .bind_recorder(site_a, recorder)
        .await
        .expect("bind again");

    assert!(matches!(
        fx.engine.bind_recorder(site_b, recorder).await,
        Err(BindingError::AlreadyBound)
    ));
    assert_eq!(fx.recorder_site(recorder).await, site_a);

    fx.engine
        .unbind_recorder(recorder)
        .await
        .expect("unbind");
    assert_eq!(fx.recorder_site(recorder).await, 0);

    assert!(matches!(
        fx.engine.unbind_recorder(recorder).await,
        Err(BindingError::NotBound)
    ));
}

#[tokio::test]
async fn recorder_binding_uses_numeric_key() {
    // 录像机绑定走站点数字主键，外部标识为空的站点也可以绑定
    let fx = Fixture::new();
    let site = fx.site("").await;
    let recorder = fx.recorder().await;

    fx.engine
        .bind_recorder(site, recorder)
        .await
        .expect("bind");
    assert_eq!(fx.recorder_site(recorder).await, site);
}

#[tokio::test]
async fn recorder_rebind_overrides() {
    let fx = Fixture::new();
    let site_a = fx.site("B-100").await;
    let site_b = fx.site("B-200").await;
    let recorder = fx.recorder().await;

    fx.engine
        .bind_recorder(site_a, recorder)
        .await
        .expect("bind");
    fx.engine
        .rebind_recorder(recorder, site_b)
        .await
        .expect("rebind");
    assert_eq!(fx.recorder_site(recorder).await, site_b);

    assert!(matches!(
        fx.engine.rebind_recorder(99, site_a).await,
        Err(BindingError::RecorderNotFound)
    ));
    assert!(matches!(
        fx.engine.rebind_recorder(recorder, 99).await,
        Err(BindingError::SiteNotFound)
    ));
}

#[tokio::test]
async fn rejected_transition_leaves_state_unchanged() {
    let fx = Fixture::new();
    let site_a = fx.site("B-100").await;
    let site_b = fx.site("B-200").await;
    let device = fx.device().await;
    let recorder = fx.recorder().await;

    fx.engine.bind_device(site_a, device).await.expect("bind");
    fx.engine
        .bind_recorder(site_a, recorder)
        .await
        .expect("bind");

    let _ = fx.engine.bind_device(site_b, device).await;
    let _ = fx.engine.bind_recorder(site_b, recorder).await;

    assert_eq!(fx.device_site(device).await, "B-100");
    assert_eq!(fx.recorder_site(recorder).await, site_a);
}
