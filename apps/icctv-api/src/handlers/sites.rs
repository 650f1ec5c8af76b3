//! 站点 CRUD handlers
//!
//! - GET /api/sites - 列出站点
//! - POST /api/sites - 创建站点
//! - PUT /api/sites/{id} - 更新站点
//! - DELETE /api/sites/{id} - 删除站点

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{not_found_error, site_to_dto, storage_error};
use crate::utils::{normalize_optional, normalize_required};
use api_contract::{ApiResponse, CreateSiteRequest, SiteDto, UpdateSiteRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use icctv_storage::{NewSite, SiteUpdate};

#[derive(serde::Deserialize)]
pub struct SitePath {
    id: i64,
}

/// 列出站点
pub async fn list_sites(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.site_store.list_sites().await {
        Ok(sites) => {
            let data: Vec<SiteDto> = sites.into_iter().map(site_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 创建站点
///
/// `site_id`（外部标识）必填：没有外部标识的站点无法接受设备绑定。
pub async fn create_site(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateSiteRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let site_id = match normalize_required(req.site_id, "site_id") {
        Ok(site_id) => site_id,
        Err(response) => return response,
    };
    let name = match normalize_required(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let site = NewSite {
        site_id,
        name,
        remark: req.remark.unwrap_or_default(),
    };
    match state.site_store.create_site(site).await {
        Ok(site) => (
            StatusCode::OK,
            Json(ApiResponse::success(site_to_dto(site))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 更新站点
pub async fn update_site(
    State(state): State<AppState>,
    Path(path): Path<SitePath>,
    headers: HeaderMap,
    Json(req): Json<UpdateSiteRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let site_id = match normalize_optional(req.site_id, "site_id") {
        Ok(site_id) => site_id,
        Err(response) => return response,
    };
    let name = match normalize_optional(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let update = SiteUpdate {
        site_id,
        name,
        remark: req.remark,
    };
    match state.site_store.update_site(path.id, update).await {
        Ok(Some(site)) => (
            StatusCode::OK,
            Json(ApiResponse::success(site_to_dto(site))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除站点
pub async fn delete_site(
    State(state): State<AppState>,
    Path(path): Path<SitePath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.site_store.delete_site(path.id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "deleted": true }))),
        )
            .into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
