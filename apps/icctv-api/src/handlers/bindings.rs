//! 绑定管理 handlers
//!
//! 设备/录像机与站点的绑定、解绑、改绑，以及站点维度的关联查询：
//! - POST /api/bindings/site-device - 绑定设备
//! - PUT /api/bindings/site-device - 改绑设备（管理员覆盖）
//! - DELETE /api/bindings/site-device - 解绑设备
//! - GET /api/bindings/site-device/{site_id} - 站点关联的设备
//! - POST/PUT/DELETE /api/bindings/site-recorder - 录像机的对应操作
//! - GET /api/bindings/site-recorder/{site_id} - 站点关联的录像机
//!
//! 状态迁移全部交给绑定引擎执行，错误按变体映射响应，见
//! `utils::response::binding_error`。

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{
    binding_error, device_to_dto, not_found_error, recorder_to_dto, storage_error,
};
use api_contract::{
    ApiResponse, BindDeviceRequest, BindRecorderRequest, DeviceDto, RebindDeviceRequest,
    RebindRecorderRequest, RecorderDto, UnbindDeviceRequest, UnbindRecorderRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

fn bound() -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({ "bound": true }))),
    )
        .into_response()
}

fn unbound() -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({ "bound": false }))),
    )
        .into_response()
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteBindingPath {
    site_id: i64,
}

/// 绑定设备到站点
pub async fn bind_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<BindDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.binding.bind_device(req.site_id, req.device_id).await {
        Ok(()) => bound(),
        Err(err) => binding_error(err),
    }
}

/// 解绑设备
pub async fn unbind_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UnbindDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.binding.unbind_device(req.device_id).await {
        Ok(()) => unbound(),
        Err(err) => binding_error(err),
    }
}

/// 改绑设备到新站点（覆盖当前归属）
pub async fn rebind_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RebindDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.binding.rebind_device(req.device_id, req.site_id).await {
        Ok(()) => bound(),
        Err(err) => binding_error(err),
    }
}

/// 站点关联的设备列表
pub async fn site_devices(
    State(state): State<AppState>,
    Path(path): Path<SiteBindingPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let site = match state.site_store.find_site(path.site_id).await {
        Ok(Some(site)) => site,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    // 外部标识为空的站点不可能有绑定设备
    if site.site_id.is_empty() {
        return (
            StatusCode::OK,
            Json(ApiResponse::success(Vec::<DeviceDto>::new())),
        )
            .into_response();
    }
    match state.device_store.list_devices(Some(&site.site_id)).await {
        Ok(devices) => {
            let data: Vec<DeviceDto> = devices.into_iter().map(device_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 绑定录像机到站点
pub async fn bind_recorder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<BindRecorderRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state
        .binding
        .bind_recorder(req.site_id, req.recorder_id)
        .await
    {
        Ok(()) => bound(),
        Err(err) => binding_error(err),
    }
}

/// 解绑录像机
pub async fn unbind_recorder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UnbindRecorderRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.binding.unbind_recorder(req.recorder_id).await {
        Ok(()) => unbound(),
        Err(err) => binding_error(err),
    }
}

/// 改绑录像机到新站点（覆盖当前归属）
pub async fn rebind_recorder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RebindRecorderRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state
        .binding
        .rebind_recorder(req.recorder_id, req.site_id)
        .await
    {
        Ok(()) => bound(),
        Err(err) => binding_error(err),
    }
}

/// 站点关联的录像机列表
pub async fn site_recorders(
    State(state): State<AppState>,
    Path(path): Path<SiteBindingPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let site = match state.site_store.find_site(path.site_id).await {
        Ok(Some(site)) => site,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    match state.recorder_store.list_recorders_for_site(site.id).await {
        Ok(recorders) => {
            let data: Vec<RecorderDto> = recorders.into_iter().map(recorder_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}
