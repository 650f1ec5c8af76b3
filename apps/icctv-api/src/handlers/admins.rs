//! 管理员 CRUD handlers
//!
//! - GET /api/admins - 分页列出管理员
//! - POST /api/admins - 创建管理员
//! - PUT /api/admins/{admin_id} - 更新管理员（用户名/口令）
//! - DELETE /api/admins/{admin_id} - 软删除管理员
//!
//! 所有接口需要 Bearer 会话 token；口令在 handler 内哈希后才进入存储。

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{admin_to_dto, internal_auth_error, not_found_error, storage_error};
use crate::utils::{normalize_optional, normalize_required};
use api_contract::{AdminDto, ApiResponse, CreateAdminRequest, PageQuery, Paged, UpdateAdminRequest};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use icctv_auth::hash_password;
use icctv_storage::AdminUpdate;

/// 分页参数上限与默认值
const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

fn clamp_page(query: &PageQuery) -> (u32, u32) {
    let page_num = query.page_num.filter(|n| *n > 0).unwrap_or(1);
    let page_size = match query.page_size {
        Some(size) if size > 0 && size <= MAX_PAGE_SIZE => size,
        _ => DEFAULT_PAGE_SIZE,
    };
    (page_num, page_size)
}

/// 分页列出管理员
pub async fn list_admins(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let (page_num, page_size) = clamp_page(&query);
    match state
        .admin_store
        .list_admins(page_num, page_size, query.asc)
        .await
    {
        Ok((admins, total)) => {
            let data = Paged::<AdminDto> {
                items: admins.into_iter().map(admin_to_dto).collect(),
                total,
                page_num,
                page_size,
            };
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 创建管理员
pub async fn create_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAdminRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let username = match normalize_required(req.username, "username") {
        Ok(username) => username,
        Err(response) => return response,
    };
    let password = match normalize_required(req.password, "password") {
        Ok(password) => password,
        Err(response) => return response,
    };
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(err) => return internal_auth_error(err),
    };
    match state.admin_store.create_admin(&username, &password_hash).await {
        Ok(admin) => (
            StatusCode::OK,
            Json(ApiResponse::success(admin_to_dto(admin))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

#[derive(serde::Deserialize)]
pub struct AdminPath {
    admin_id: i64,
}

/// 更新管理员（用户名与口令均可选）
pub async fn update_admin(
    State(state): State<AppState>,
    Path(path): Path<AdminPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateAdminRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let username = match normalize_optional(req.username, "username") {
        Ok(username) => username,
        Err(response) => return response,
    };
    let password = match normalize_optional(req.password, "password") {
        Ok(password) => password,
        Err(response) => return response,
    };
    let password_hash = match password {
        Some(password) => match hash_password(&password) {
            Ok(hash) => Some(hash),
            Err(err) => return internal_auth_error(err),
        },
        None => None,
    };
    let update = AdminUpdate {
        username,
        password_hash,
    };
    match state.admin_store.update_admin(path.admin_id, update).await {
        Ok(Some(admin)) => (
            StatusCode::OK,
            Json(ApiResponse::success(admin_to_dto(admin))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 软删除管理员
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(path): Path<AdminPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.admin_store.delete_admin(path.admin_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "deleted": true }))),
        )
            .into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
