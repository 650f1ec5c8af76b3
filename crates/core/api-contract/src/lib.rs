//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 分页查询参数。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
    #[serde(default)]
    pub asc: bool,
}

/// 分页结果封装。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page_num: u32,
    pub page_size: u32,
}

// ============================================================================
// 认证
// ============================================================================

/// 登录请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// 过期时间（Unix 毫秒时间戳）。
    pub expires_at: u64,
    pub username: String,
}

/// 视频访问 Token 请求体（公开接口）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTokenRequest {
    pub site_id: String,
    pub channels: Vec<String>,
}

/// 视频访问 Token 响应体。
#[derive(Debug, Serialize)]
pub struct VideoTokenResponse {
    pub token: String,
}

// ============================================================================
// 管理员
// ============================================================================

/// 管理员返回结构（不含口令哈希）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub admin_id: i64,
    pub username: String,
}

/// 管理员创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
}

/// 管理员更新请求体（缺省字段保持不变）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// 站点
// ============================================================================

/// 站点返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDto {
    pub id: i64,
    pub site_id: String,
    pub name: String,
    pub remark: String,
}

/// 站点创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteRequest {
    pub site_id: String,
    pub name: String,
    pub remark: Option<String>,
}

/// 站点更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteRequest {
    pub site_id: Option<String>,
    pub name: Option<String>,
    pub remark: Option<String>,
}

// ============================================================================
// 设备
// ============================================================================

/// 设备返回结构。
///
/// `site_id` 为所绑定站点的外部标识，空字符串表示未绑定。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub id: i64,
    pub site_id: String,
    pub name: String,
    pub auth_service_remote_port: i32,
    pub ssh_remote_port: i32,
    pub active: bool,
}

/// 设备创建请求体。
///
/// 不含 `site_id`：绑定关系只能通过绑定接口变更。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    pub name: String,
    pub auth_service_remote_port: i32,
    pub ssh_remote_port: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// 设备更新请求体（缺省字段保持不变，不含 `site_id`）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub auth_service_remote_port: Option<i32>,
    pub ssh_remote_port: Option<i32>,
    pub active: Option<bool>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// 录像机
// ============================================================================

/// 录像机账户凭证。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderCredentialDto {
    pub name: String,
    pub password: String,
}

/// 录像机返回结构。
///
/// `site_id` 为所绑定站点的数字主键，0 表示未绑定。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderDto {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub site_id: i64,
    pub admin_user: RecorderCredentialDto,
    pub users: Vec<RecorderCredentialDto>,
}

/// 录像机创建请求体（不含 `site_id`：绑定关系只能通过绑定接口变更）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecorderRequest {
    pub name: String,
    pub url: String,
    pub admin_user: RecorderCredentialDto,
    #[serde(default)]
    pub users: Vec<RecorderCredentialDto>,
}

/// 录像机更新请求体（缺省字段保持不变，不含 `site_id`）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecorderRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub admin_user: Option<RecorderCredentialDto>,
    pub users: Option<Vec<RecorderCredentialDto>>,
}

// ============================================================================
// 绑定
// ============================================================================

/// 设备绑定请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindDeviceRequest {
    pub site_id: i64,
    pub device_id: i64,
}

/// 设备解绑请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbindDeviceRequest {
    pub device_id: i64,
}

/// 设备改绑请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebindDeviceRequest {
    pub device_id: i64,
    pub site_id: i64,
}

/// 录像机绑定请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindRecorderRequest {
    pub site_id: i64,
    pub recorder_id: i64,
}

/// 录像机解绑请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbindRecorderRequest {
    pub recorder_id: i64,
}

/// 录像机改绑请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebindRecorderRequest {
    pub recorder_id: i64,
    pub site_id: i64,
}

// ============================================================================
// 公网配置与远程控制
// ============================================================================

/// 公网配置返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicNetDto {
    pub external_ip: String,
}

/// 公网配置更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublicNetRequest {
    pub external_ip: String,
}

/// 设备端口远程更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePortsRequest {
    pub ssh_remote_port: i32,
    pub auth_service_remote_port: i32,
}
