//! 公网配置 handlers
//!
//! - GET /api/public-net - 获取当前公网配置
//! - PUT /api/public-net - 写入或更新外部 IP

use crate::AppState;
use crate::middleware::require_admin;
use crate::utils::response::{not_found_error, public_net_to_dto, storage_error};
use crate::utils::normalize_required;
use api_contract::{ApiResponse, UpdatePublicNetRequest};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

/// 获取公网配置
pub async fn get_public_net(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    match state.public_net_store.get_public_net().await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(ApiResponse::success(public_net_to_dto(record))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 写入或更新外部 IP
pub async fn update_public_net(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdatePublicNetRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &headers) {
        return response;
    }
    let external_ip = match normalize_required(req.external_ip, "external_ip") {
        Ok(external_ip) => external_ip,
        Err(response) => return response,
    };
    match state.public_net_store.upsert_public_net(&external_ip).await {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(public_net_to_dto(record))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}
