use icctv_storage::{
    AdminStore, AdminUpdate, DeviceStore, DeviceUpdate, InMemoryStore, NewDevice, NewRecorder,
    NewSite, PublicNetStore, RecorderCredential, RecorderStore, SiteStore, SiteUpdate,
};

fn sample_site(site_id: &str) -> NewSite {
    NewSite {
        site_id: site_id.to_string(),
        name: "一号楼".to_string(),
        remark: String::new(),
    }
}

fn sample_device(name: &str) -> NewDevice {
    NewDevice {
        name: name.to_string(),
        auth_service_remote_port: 18080,
        ssh_remote_port: 10022,
        active: true,
    }
}

#[tokio::test]
async fn find_default_admin() {
    let store = InMemoryStore::with_default_admin();
    let admin = store
        .find_by_username("admin")
        .await
        .expect("query")
        .expect("admin");
    assert_eq!(admin.username, "admin");
    assert_eq!(admin.admin_id, 1);
}

#[tokio::test]
async fn admin_crud_and_soft_delete_visibility() {
    let store = InMemoryStore::new();
    let created = store.create_admin("ops", "hash-1").await.expect("create");
    assert_eq!(store.count_admins().await.expect("count"), 1);

    // 用户名唯一
    assert!(store.create_admin("ops", "hash-2").await.is_err());

    let updated = store
        .update_admin(
            created.admin_id,
            AdminUpdate {
                username: Some("ops2".to_string()),
                password_hash: None,
            },
        )
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(updated.username, "ops2");
    assert_eq!(updated.password_hash, "hash-1");

    assert!(store.delete_admin(created.admin_id).await.expect("delete"));
    assert!(
        store
            .find_admin(created.admin_id)
            .await
            .expect("query")
            .is_none()
    );
    // 删除后主键不复用
    let next = store.create_admin("ops3", "hash-3").await.expect("create");
    assert!(next.admin_id > created.admin_id);
}

#[tokio::test]
async fn admin_list_pages() {
    let store = InMemoryStore::new();
    for index in 0..5 {
        store
            .create_admin(&format!("admin-{index}"), "hash")
            .await
            .expect("create");
    }
    let (page, total) = store.list_admins(1, 2, true).await.expect("list");
    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].username, "admin-0");

    let (page, _) = store.list_admins(3, 2, true).await.expect("list");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].username, "admin-4");

    let (page, _) = store.list_admins(1, 2, false).await.expect("list");
    assert_eq!(page[0].username, "admin-4");
}

#[tokio::test]
async fn site_lookup_by_external_id() {
    let store = InMemoryStore::new();
    store.create_site(sample_site("B-100")).await.expect("create");
    let found = store
        .find_site_by_external_id("B-100")
        .await
        .expect("query")
        .expect("site");
    assert_eq!(found.name, "一号楼");
    assert!(
        store
            .find_site_by_external_id("B-999")
            .await
            .expect("query")
            .is_none()
    );

    let updated = store
        .update_site(
            found.id,
            SiteUpdate {
                site_id: None,
                name: None,
                remark: Some("东门".to_string()),
            },
        )
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(updated.site_id, "B-100");
    assert_eq!(updated.remark, "东门");
}

#[tokio::test]
async fn device_filter_and_count() {
    let store = InMemoryStore::new();
    let device = store
        .create_device(sample_device("relay-1"))
        .await
        .expect("create");
    // 创建时始终未绑定
    assert_eq!(device.site_id, "");
    assert_eq!(
        store.count_devices_for_site("B-100").await.expect("count"),
        0
    );
    assert_eq!(store.list_devices(Some("B-100")).await.expect("list").len(), 0);
    assert_eq!(store.list_devices(None).await.expect("list").len(), 1);

    let updated = store
        .update_device(
            device.id,
            DeviceUpdate {
                name: None,
                auth_service_remote_port: Some(18081),
                ssh_remote_port: None,
                active: Some(false),
            },
        )
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(updated.auth_service_remote_port, 18081);
    assert_eq!(updated.ssh_remote_port, 10022);
    assert!(!updated.active);

    assert!(store.delete_device(device.id).await.expect("delete"));
    assert!(!store.delete_device(device.id).await.expect("delete"));
}

#[tokio::test]
async fn recorder_crud() {
    let store = InMemoryStore::new();
    let recorder = store
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
        .expect("create");
    assert_eq!(recorder.site_id, 0);

    let for_site = store.list_recorders_for_site(1).await.expect("list");
    assert!(for_site.is_empty());

    let found = store
        .find_recorder(recorder.id)
        .await
        .expect("query")
        .expect("recorder");
    assert_eq!(found.admin_user.name, "admin");
}

#[tokio::test]
async fn public_net_upsert() {
    let store = InMemoryStore::new();
    assert!(store.get_public_net().await.expect("query").is_none());

    let created = store.upsert_public_net("1.2.3.4").await.expect("upsert");
    assert_eq!(created.external_ip, "1.2.3.4");

    let updated = store.upsert_public_net("5.6.7.8").await.expect("upsert");
    assert_eq!(updated.id, created.id);
    assert_eq!(
        store
            .get_public_net()
            .await
            .expect("query")
            .expect("record")
            .external_ip,
        "5.6.7.8"
    );
}
