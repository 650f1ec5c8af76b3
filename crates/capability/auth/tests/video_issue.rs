use icctv_auth::{AuthError, VideoTokenService, VideoTokenSigner};
use icctv_storage::{BindingStore, DeviceStore, InMemoryStore, NewDevice, NewSite, SiteStore};
use std::sync::Arc;

fn service(store: Arc<InMemoryStore>) -> VideoTokenService {
    VideoTokenService::new(
        store.clone(),
        store,
        VideoTokenSigner::new("video-secret".to_string()),
    )
}

async fn seed_site(store: &InMemoryStore, site_id: &str) {
    store
        .create_site(NewSite {
            site_id: site_id.to_string(),
            name: "一号楼".to_string(),
            remark: String::new(),
        })
        .await
        .expect("site");
}

async fn seed_bound_device(store: &InMemoryStore, site_id: &str) {
    let device = store
        .create_device(NewDevice {
            name: "relay-1".to_string(),
            auth_service_remote_port: 18080,
            ssh_remote_port: 10022,
            active: true,
        })
        .await
        .expect("device");
    let mut txn = store.begin().await.expect("begin");
    txn.save_device_site(device.id, site_id).await.expect("save");
    txn.commit().await.expect("commit");
}

#[tokio::test]
async fn unknown_site_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(store);
    assert!(matches!(
        service.issue("B-999", vec!["cam1".to_string()]).await,
        Err(AuthError::SiteNotFound(site)) if site == "B-999"
    ));
}

#[tokio::test]
async fn empty_channels_rejected() {
    let store = Arc::new(InMemoryStore::new());
    seed_site(&store, "B-100").await;
    seed_bound_device(&store, "B-100").await;
    let service = service(store);
    // 站点存在但频道为空
    assert!(matches!(
        service.issue("B-100", Vec::new()).await,
        Err(AuthError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn site_without_devices_rejected() {
    let store = Arc::new(InMemoryStore::new());
    seed_site(&store, "B-100").await;
    let service = service(store);
    assert!(matches!(
        service.issue("B-100", vec!["cam1".to_string()]).await,
        Err(AuthError::NoDevicesBound(_))
    ));
}

#[tokio::test]
async fn issued_token_round_trips() {
    let store = Arc::new(InMemoryStore::new());
    seed_site(&store, "B-100").await;
    seed_bound_device(&store, "B-100").await;
    let service = service(store);

    let token = service
        .issue("B-100", vec!["cam1".to_string(), "cam2".to_string()])
        .await
        .expect("token");
    let payload = service.verify(&token).expect("verify");
    assert_eq!(payload.site_id, "B-100");
    assert_eq!(payload.channels, vec!["cam1", "cam2"]);
}
