//! ICCTV 管理端 HTTP API：认证、资产 CRUD、绑定管理、远程控制。
//!
//! 所有依赖在此处显式构建并注入（配置 → 连接池 → 存储 → 服务 →
//! 路由），进程内没有全局存储句柄。

mod handlers;
mod middleware;
mod routes;
mod utils;

use icctv_auth::{
    AuthService, JwtManager, VideoTokenService, VideoTokenSigner, ensure_default_admin,
};
use icctv_binding::BindingEngine;
use icctv_config::AppConfig;
use icctv_remote::{HttpRemoteClient, RemoteService};
use icctv_storage::{
    AdminStore, BindingStore, DeviceStore, PgAdminStore, PgBindingStore, PgDeviceStore,
    PgPublicNetStore, PgRecorderStore, PgSiteStore, PublicNetStore, RecorderStore, SiteStore,
    connect_pool,
};
use icctv_telemetry::init_tracing;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// 全部 handler 共享的应用状态。
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub video_tokens: Arc<VideoTokenService>,
    pub binding: Arc<BindingEngine>,
    pub remote: Arc<RemoteService>,
    pub admin_store: Arc<dyn AdminStore>,
    pub site_store: Arc<dyn SiteStore>,
    pub device_store: Arc<dyn DeviceStore>,
    pub recorder_store: Arc<dyn RecorderStore>,
    pub public_net_store: Arc<dyn PublicNetStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // Postgres 存储（需先建好表结构）
    let pool = connect_pool(&config.database_url).await?;
    let admin_store: Arc<dyn AdminStore> = Arc::new(PgAdminStore::new(pool.clone()));
    let site_store: Arc<dyn SiteStore> = Arc::new(PgSiteStore::new(pool.clone()));
    let device_store: Arc<dyn DeviceStore> = Arc::new(PgDeviceStore::new(pool.clone()));
    let recorder_store: Arc<dyn RecorderStore> = Arc::new(PgRecorderStore::new(pool.clone()));
    let public_net_store: Arc<dyn PublicNetStore> =
        Arc::new(PgPublicNetStore::new(pool.clone()));
    let binding_store: Arc<dyn BindingStore> = Arc::new(PgBindingStore::new(pool));

    // 空库时创建默认管理员
    if let Some(admin) = ensure_default_admin(admin_store.as_ref()).await? {
        tracing::warn!(
            username = %admin.username,
            "default admin account created, change its password"
        );
    }

    // 服务装配
    let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_ttl_minutes * 60);
    let auth = Arc::new(AuthService::new(admin_store.clone(), jwt));
    let video_tokens = Arc::new(VideoTokenService::new(
        site_store.clone(),
        device_store.clone(),
        VideoTokenSigner::new(config.video_token_secret.clone()),
    ));
    let binding = Arc::new(BindingEngine::new(binding_store));
    let remote_client = Arc::new(HttpRemoteClient::new()?);
    let remote = Arc::new(RemoteService::new(
        device_store.clone(),
        public_net_store.clone(),
        remote_client,
    ));

    let state = AppState {
        auth,
        video_tokens,
        binding,
        remote,
        admin_store,
        site_store,
        device_store,
        recorder_store,
        public_net_store,
    };

    // 管理前端部署在独立域名下，放开跨域
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_api_router()
        .with_state(state)
        // 注入 request_id/trace_id
        .layer(axum::middleware::from_fn(middleware::request_context))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!(addr = %config.http_addr, "icctv api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
