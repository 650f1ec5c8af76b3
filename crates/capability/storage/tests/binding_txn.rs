use icctv_storage::{
    BindingStore, DeviceStore, InMemoryStore, NewDevice, NewSite, SiteStore,
};

async fn seed(store: &InMemoryStore) -> (i64, i64) {
    let site = store
        .create_site(NewSite {
            site_id: "B-100".to_string(),
            name: "一号楼".to_string(),
            remark: String::new(),
        })
        .await
        .expect("site");
    let device = store
        .create_device(NewDevice {
            name: "relay-1".to_string(),
            auth_service_remote_port: 18080,
            ssh_remote_port: 10022,
            active: true,
        })
        .await
        .expect("device");
    (site.id, device.id)
}

#[tokio::test]
async fn committed_write_is_visible() {
    let store = InMemoryStore::new();
    let (site_id, device_id) = seed(&store).await;

    let mut txn = store.begin().await.expect("begin");
    let site = txn.get_site(site_id).await.expect("get").expect("site");
    txn.save_device_site(device_id, &site.site_id)
        .await
        .expect("save");
    txn.commit().await.expect("commit");

    let device = store
        .find_device(device_id)
        .await
        .expect("query")
        .expect("device");
    assert_eq!(device.site_id, "B-100");
}

#[tokio::test]
async fn dropped_txn_rolls_back() {
    let store = InMemoryStore::new();
    let (_, device_id) = seed(&store).await;

    {
        let mut txn = store.begin().await.expect("begin");
        txn.save_device_site(device_id, "B-100").await.expect("save");
        // 未 commit，作用域结束即丢弃
    }

    let device = store
        .find_device(device_id)
        .await
        .expect("query")
        .expect("device");
    assert_eq!(device.site_id, "");
}

#[tokio::test]
async fn save_unknown_device_fails() {
    let store = InMemoryStore::new();
    let mut txn = store.begin().await.expect("begin");
    assert!(txn.save_device_site(99, "B-100").await.is_err());
}
