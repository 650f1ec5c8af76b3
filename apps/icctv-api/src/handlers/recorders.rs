//! 录像机 CRUD handlers
//!
//! - GET /api/recorders - 列出录像机
//! - POST /api/recorders - 创建录像机（创建时未绑定）
//! - GET /api/recorders/{id} - 获取录像机详情
//! - PUT /api/recorders/{id} - 更新录像机
//! - DELETE /api/recorders/{id} - 删除录像机
//!
//! 录像机的站点归属不在此处修改，走 /api/bindings/site-recorder。

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{not_found_error, recorder_to_dto, storage_error};
use crate::utils::{normalize_optional, normalize_required};
use api_contract::{
    ApiResponse, CreateRecorderRequest, RecorderCredentialDto, RecorderDto, UpdateRecorderRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use icctv_storage::{NewRecorder, RecorderCredential, RecorderUpdate};

#[derive(serde::Deserialize)]
pub struct RecorderPath {
    id: i64,
}

fn credential_from_dto(dto: RecorderCredentialDto) -> RecorderCredential {
    RecorderCredential {
        name: dto.name,
        password: dto.password,
    }
}

/// 列出录像机
pub async fn list_recorders(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.recorder_store.list_recorders().await {
        Ok(recorders) => {
            let data: Vec<RecorderDto> = recorders.into_iter().map(recorder_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 获取录像机详情
pub async fn get_recorder(
    State(state): State<AppState>,
    Path(path): Path<RecorderPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.recorder_store.find_recorder(path.id).await {
        Ok(Some(recorder)) => (
            StatusCode::OK,
            Json(ApiResponse::success(recorder_to_dto(recorder))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 创建录像机
pub async fn create_recorder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateRecorderRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let name = match normalize_required(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let url = match normalize_required(req.url, "url") {
        Ok(url) => url,
        Err(response) => return response,
    };
    let recorder = NewRecorder {
        name,
        url,
        admin_user: credential_from_dto(req.admin_user),
        users: req.users.into_iter().map(credential_from_dto).collect(),
    };
    match state.recorder_store.create_recorder(recorder).await {
        Ok(recorder) => (
            StatusCode::OK,
            Json(ApiResponse::success(recorder_to_dto(recorder))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 更新录像机
pub async fn update_recorder(
    State(state): State<AppState>,
    Path(path): Path<RecorderPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateRecorderRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let name = match normalize_optional(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let url = match normalize_optional(req.url, "url") {
        Ok(url) => url,
        Err(response) => return response,
    };
    let update = RecorderUpdate {
        name,
        url,
        admin_user: req.admin_user.map(credential_from_dto),
        users: req
            .users
            .map(|users| users.into_iter().map(credential_from_dto).collect()),
    };
    match state.recorder_store.update_recorder(path.id, update).await {
        Ok(Some(recorder)) => (
            StatusCode::OK,
            Json(ApiResponse::success(recorder_to_dto(recorder))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除录像机
pub async fn delete_recorder(
    State(state): State<AppState>,
    Path(path): Path<RecorderPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.recorder_store.delete_recorder(path.id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "deleted": true }))),
        )
            .into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
