//! 设备远程控制 handlers
//!
//! 经公网转发端口代理调用设备侧 agent：
//! - POST /api/devices/{id}/remote/ports - 远程更新转发端口
//! - GET /api/devices/{id}/remote/info - 远程获取设备信息
//! - GET /api/devices/{id}/remote/health - 远程健康检查
//!
//! 调用失败不重试，错误映射见 `utils::response::remote_error`。

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::remote_error;
use api_contract::{ApiResponse, RemotePortsRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

#[derive(serde::Deserialize)]
pub struct RemoteDevicePath {
    id: i64,
}

/// 远程更新设备转发端口
pub async fn remote_update_ports(
    State(state): State<AppState>,
    Path(path): Path<RemoteDevicePath>,
    headers: HeaderMap,
    Json(req): Json<RemotePortsRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state
        .remote
        .update_ports(path.id, req.ssh_remote_port, req.auth_service_remote_port)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::success(result))).into_response(),
        Err(err) => remote_error(err),
    }
}

/// 远程获取设备信息
pub async fn remote_device_info(
    State(state): State<AppState>,
    Path(path): Path<RemoteDevicePath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.remote.device_info(path.id).await {
        Ok(info) => (StatusCode::OK, Json(ApiResponse::success(info))).into_response(),
        Err(err) => remote_error(err),
    }
}

/// 远程健康检查
pub async fn remote_health_check(
    State(state): State<AppState>,
    Path(path): Path<RemoteDevicePath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.remote.health_check(path.id).await {
        Ok(status) => (StatusCode::OK, Json(ApiResponse::success(status))).into_response(),
        Err(err) => remote_error(err),
    }
}
