//! 设备 CRUD handlers
//!
//! - GET /api/devices - 列出设备（可按站点外部标识过滤）
//! - POST /api/devices - 创建设备（创建时未绑定）
//! - PUT /api/devices/{id} - 更新设备
//! - DELETE /api/devices/{id} - 删除设备
//!
//! 设备的站点归属（site_id 字段）不在此处修改：
//! 绑定、解绑、改绑走 /api/bindings/site-device。

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{device_to_dto, not_found_error, storage_error};
use crate::utils::{normalize_optional, normalize_required};
use api_contract::{ApiResponse, CreateDeviceRequest, DeviceDto, UpdateDeviceRequest};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use icctv_storage::{DeviceUpdate, NewDevice};

#[derive(serde::Deserialize)]
pub struct DevicePath {
    id: i64,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListQuery {
    site_id: Option<String>,
}

/// 列出设备
pub async fn list_devices(
    State(state): State<AppState>,
    Query(query): Query<DeviceListQuery>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state
        .device_store
        .list_devices(query.site_id.as_deref())
        .await
    {
        Ok(devices) => {
            let data: Vec<DeviceDto> = devices.into_iter().map(device_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 创建设备
pub async fn create_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let name = match normalize_required(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let device = NewDevice {
        name,
        auth_service_remote_port: req.auth_service_remote_port,
        ssh_remote_port: req.ssh_remote_port,
        active: req.active,
    };
    match state.device_store.create_device(device).await {
        Ok(device) => (
            StatusCode::OK,
            Json(ApiResponse::success(device_to_dto(device))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 更新设备
pub async fn update_device(
    State(state): State<AppState>,
    Path(path): Path<DevicePath>,
    headers: HeaderMap,
    Json(req): Json<UpdateDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let name = match normalize_optional(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let update = DeviceUpdate {
        name,
        auth_service_remote_port: req.auth_service_remote_port,
        ssh_remote_port: req.ssh_remote_port,
        active: req.active,
    };
    match state.device_store.update_device(path.id, update).await {
        Ok(Some(device)) => (
            StatusCode::OK,
            Json(ApiResponse::success(device_to_dto(device))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除设备
pub async fn delete_device(
    State(state): State<AppState>,
    Path(path): Path<DevicePath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.device_store.delete_device(path.id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "deleted": true }))),
        )
            .into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
