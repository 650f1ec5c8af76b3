//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查：/health
//! - 认证接口：/api/auth/*（公开）
//! - 管理员管理：/api/admins/*
//! - 站点管理：/api/sites/*
//! - 设备管理：/api/devices/*（含远程控制子路径）
//! - 录像机管理：/api/recorders/*
//! - 绑定管理：/api/bindings/*
//! - 公网配置：/api/public-net

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post, put},
};

/// 创建 API 路由
///
/// 除 /health 与 /api/auth/* 外的全部端点在 handler 内校验
/// 管理员会话 token。
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/public", post(video_token))
        .route("/api/admins", get(list_admins).post(create_admin))
        .route(
            "/api/admins/:admin_id",
            put(update_admin).delete(delete_admin),
        )
        .route("/api/sites", get(list_sites).post(create_site))
        .route("/api/sites/:id", put(update_site).delete(delete_site))
        .route("/api/devices", get(list_devices).post(create_device))
        .route("/api/devices/:id", put(update_device).delete(delete_device))
        .route("/api/devices/:id/remote/ports", post(remote_update_ports))
        .route("/api/devices/:id/remote/info", get(remote_device_info))
        .route("/api/devices/:id/remote/health", get(remote_health_check))
        .route("/api/recorders", get(list_recorders).post(create_recorder))
        .route(
            "/api/recorders/:id",
            get(get_recorder).put(update_recorder).delete(delete_recorder),
        )
        .route(
            "/api/bindings/site-device",
            post(bind_device).put(rebind_device).delete(unbind_device),
        )
        .route("/api/bindings/site-device/:site_id", get(site_devices))
        .route(
            "/api/bindings/site-recorder",
            post(bind_recorder).put(rebind_recorder).delete(unbind_recorder),
        )
        .route("/api/bindings/site-recorder/:site_id", get(site_recorders))
        .route(
            "/api/public-net",
            get(get_public_net).put(update_public_net),
        )
}
