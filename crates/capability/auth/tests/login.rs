use icctv_auth::{AuthError, AuthService, JwtManager, ensure_default_admin};
use icctv_storage::{AdminStore, InMemoryStore};
use std::sync::Arc;

fn auth_service(store: Arc<InMemoryStore>) -> AuthService {
    AuthService::new(store, JwtManager::new("secret".to_string(), 7200))
}

#[tokio::test]
async fn login_issues_verifiable_token() {
    let store = Arc::new(InMemoryStore::with_default_admin());
    let auth = auth_service(store.clone());

    let (admin, token) = auth.login("admin", "123456").await.expect("login");
    assert_eq!(admin.username, "admin");

    let ctx = auth
        .verify_access_token(&token.access_token)
        .expect("verify");
    assert_eq!(ctx.admin_id, admin.admin_id);
    assert_eq!(ctx.username, "admin");
}

#[tokio::test]
async fn login_upgrades_legacy_password() {
    let store = Arc::new(InMemoryStore::with_default_admin());
    let auth = auth_service(store.clone());

    auth.login("admin", "123456").await.expect("login");

    let stored = store
        .find_by_username("admin")
        .await
        .expect("query")
        .expect("admin");
    assert!(stored.password_hash.starts_with("$argon2"));

    // 升级后仍可用同一口令登录
    auth.login("admin", "123456").await.expect("login again");
}

#[tokio::test]
async fn wrong_password_rejected() {
    let store = Arc::new(InMemoryStore::with_default_admin());
    let auth = auth_service(store);
    assert!(matches!(
        auth.login("admin", "bad").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn unknown_user_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let auth = auth_service(store);
    assert!(matches!(
        auth.login("ghost", "123456").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn default_admin_provisioned_once() {
    let store = Arc::new(InMemoryStore::new());

    let created = ensure_default_admin(store.as_ref()).await.expect("bootstrap");
    assert!(created.is_some());
    let stored = store
        .find_by_username("admin")
        .await
        .expect("query")
        .expect("admin");
    assert!(stored.password_hash.starts_with("$argon2"));

    // 已有账户时不再创建
    let repeated = ensure_default_admin(store.as_ref()).await.expect("bootstrap");
    assert!(repeated.is_none());

    // 默认口令可登录
    let auth = auth_service(store);
    auth.login("admin", "123456").await.expect("login");
}
