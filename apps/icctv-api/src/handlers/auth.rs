//! 认证相关 handlers：健康检查、管理员登录、视频访问 Token
//!
//! ## 提供的端点（均无需会话 token）
//!
//! - `GET /health` - 健康检查，返回 `{"ok": true}`
//! - `POST /api/auth/login` - 管理员登录，验证用户名密码后返回会话 token
//! - `POST /api/auth/public` - 为站点/频道组合签发视频访问 token，
//!   要求站点存在且至少绑定一台设备
//!
//! 视频 token 不携带管理员身份，使用独立密钥签名，
//! 是交给播放端的受限凭证。

use crate::AppState;
use crate::utils::response::{auth_error, internal_auth_error, video_issue_error};
use crate::utils::normalize_required;
use api_contract::{ApiResponse, LoginRequest, LoginResponse, VideoTokenRequest, VideoTokenResponse};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use icctv_auth::AuthError;

/// 健康检查端点
///
/// 只反映进程存活，不做外部依赖检查。
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// 登录接口
///
/// 验证用户名和密码，成功后返回会话 token 与过期时间。
///
/// # Errors
///
/// - `401 UNAUTHORIZED`: 用户名或密码错误（`InvalidCredentials`）
/// - `500 INTERNAL SERVER ERROR`: 认证服务内部错误
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.auth.login(&req.username, &req.password).await {
        Ok((admin, token)) => {
            let response = LoginResponse {
                access_token: token.access_token,
                // 秒级时间戳转毫秒级（前端期望的时间戳格式）
                expires_at: token.expires_at.saturating_mul(1000),
                username: admin.username,
            };
            (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
        }
        Err(AuthError::InvalidCredentials) => auth_error(StatusCode::UNAUTHORIZED),
        Err(err) => internal_auth_error(err),
    }
}

/// 签发视频访问 Token
///
/// 公开接口：调用方无需会话，但目标站点必须存在、频道列表非空、
/// 且站点当前至少绑定一台设备。
///
/// # Errors
///
/// - `400 BAD REQUEST`: 频道为空或站点未绑定任何设备
/// - `404 NOT FOUND`: 站点不存在
pub async fn video_token(
    State(state): State<AppState>,
    Json(req): Json<VideoTokenRequest>,
) -> Response {
    let site_id = match normalize_required(req.site_id, "site_id") {
        Ok(site_id) => site_id,
        Err(response) => return response,
    };
    match state.video_tokens.issue(&site_id, req.channels).await {
        Ok(token) => (
            StatusCode::OK,
            Json(ApiResponse::success(VideoTokenResponse { token })),
        )
            .into_response(),
        Err(err) => video_issue_error(err),
    }
}
