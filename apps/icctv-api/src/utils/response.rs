//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：auth_error, bad_request_error, not_found_error,
//!   internal_auth_error, storage_error, binding_error, video_issue_error,
//!   remote_error
//! - DTO 转换：admin_to_dto, site_to_dto, device_to_dto, recorder_to_dto,
//!   public_net_to_dto
//!
//! 设计原则：
//! - 所有错误返回统一的 ApiResponse 格式
//! - 业务错误按枚举变体映射状态码与错误码，不做错误文本匹配
//! - 存储错误一律作为内部错误透传，不伪装成业务错误

use api_contract::{
    AdminDto, ApiResponse, DeviceDto, PublicNetDto, RecorderCredentialDto, RecorderDto, SiteDto,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use icctv_auth::AuthError;
use icctv_binding::BindingError;
use icctv_remote::RemoteError;
use icctv_storage::{
    AdminRecord, DeviceRecord, PublicNetRecord, RecorderCredential, RecorderRecord, SiteRecord,
    StorageError,
};

/// 认证错误响应
pub fn auth_error(status: StatusCode) -> Response {
    (
        status,
        Json(ApiResponse::<()>::error(
            "AUTH.UNAUTHORIZED",
            "unauthorized",
        )),
    )
        .into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 认证内部错误响应
pub fn internal_auth_error(err: AuthError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 存储错误响应
pub fn storage_error(err: StorageError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 绑定错误响应：按变体映射状态码与错误码
pub fn binding_error(err: BindingError) -> Response {
    let (status, code) = match &err {
        BindingError::SiteNotFound => (StatusCode::NOT_FOUND, "BINDING.SITE_NOT_FOUND"),
        BindingError::DeviceNotFound => (StatusCode::NOT_FOUND, "BINDING.DEVICE_NOT_FOUND"),
        BindingError::RecorderNotFound => {
            (StatusCode::NOT_FOUND, "BINDING.RECORDER_NOT_FOUND")
        }
        BindingError::AlreadyBound => (StatusCode::CONFLICT, "BINDING.ALREADY_BOUND"),
        BindingError::NotBound => (StatusCode::CONFLICT, "BINDING.NOT_BOUND"),
        BindingError::SiteMissingExternalId => {
            (StatusCode::BAD_REQUEST, "BINDING.SITE_MISSING_EXTERNAL_ID")
        }
        BindingError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR"),
    };
    (status, Json(ApiResponse::<()>::error(code, err.to_string()))).into_response()
}

/// 视频 Token 签发错误响应
pub fn video_issue_error(err: AuthError) -> Response {
    let (status, code) = match &err {
        AuthError::SiteNotFound(_) => (StatusCode::NOT_FOUND, "VIDEO.SITE_NOT_FOUND"),
        AuthError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID.REQUEST"),
        AuthError::NoDevicesBound(_) => (StatusCode::BAD_REQUEST, "VIDEO.NO_DEVICES_BOUND"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR"),
    };
    (status, Json(ApiResponse::<()>::error(code, err.to_string()))).into_response()
}

/// 远程控制错误响应
pub fn remote_error(err: RemoteError) -> Response {
    let (status, code) = match &err {
        RemoteError::DeviceNotFound => (StatusCode::NOT_FOUND, "RESOURCE.NOT_FOUND"),
        RemoteError::PublicNetMissing => {
            (StatusCode::BAD_REQUEST, "REMOTE.PUBLIC_NET_MISSING")
        }
        RemoteError::Transport(_) => (StatusCode::BAD_GATEWAY, "REMOTE.UNREACHABLE"),
        RemoteError::Decode(_) => (StatusCode::BAD_GATEWAY, "REMOTE.BAD_RESPONSE"),
        RemoteError::Storage(_) | RemoteError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR")
        }
    };
    (status, Json(ApiResponse::<()>::error(code, err.to_string()))).into_response()
}

/// AdminRecord 转 AdminDto（不携带口令哈希）
pub fn admin_to_dto(record: AdminRecord) -> AdminDto {
    AdminDto {
        admin_id: record.admin_id,
        username: record.username,
    }
}

/// SiteRecord 转 SiteDto
pub fn site_to_dto(record: SiteRecord) -> SiteDto {
    SiteDto {
        id: record.id,
        site_id: record.site_id,
        name: record.name,
        remark: record.remark,
    }
}

/// DeviceRecord 转 DeviceDto
pub fn device_to_dto(record: DeviceRecord) -> DeviceDto {
    DeviceDto {
        id: record.id,
        site_id: record.site_id,
        name: record.name,
        auth_service_remote_port: record.auth_service_remote_port,
        ssh_remote_port: record.ssh_remote_port,
        active: record.active,
    }
}

fn credential_to_dto(credential: RecorderCredential) -> RecorderCredentialDto {
    RecorderCredentialDto {
        name: credential.name,
        password: credential.password,
    }
}

/// RecorderRecord 转 RecorderDto
pub fn recorder_to_dto(record: RecorderRecord) -> RecorderDto {
    RecorderDto {
        id: record.id,
        name: record.name,
        url: record.url,
        site_id: record.site_id,
        admin_user: credential_to_dto(record.admin_user),
        users: record.users.into_iter().map(credential_to_dto).collect(),
    }
}

/// PublicNetRecord 转 PublicNetDto
pub fn public_net_to_dto(record: PublicNetRecord) -> PublicNetDto {
    PublicNetDto {
        external_ip: record.external_ip,
    }
}
