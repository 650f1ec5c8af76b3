//! 认证能力：管理员登录、会话 JWT、视频访问 Token。
//!
//! 两类凭证使用相互独立的密钥与格式：会话 token 是 HS256 JWT，
//! 证明管理员身份；视频 token 是 HMAC-SHA256 签名的受限凭证，
//! 发给不受信任的播放端，不携带任何管理员身份，泄露后也无法
//! 伪造会话。

mod bootstrap;
mod jwt;
mod password;
mod video;

use domain::AdminContext;
use icctv_storage::{AdminRecord, AdminStore, DeviceStore, SiteStore, StorageError};
use std::sync::Arc;

pub use bootstrap::{DEFAULT_ADMIN_USERNAME, ensure_default_admin};
pub use jwt::JwtManager;
pub use password::{PasswordCheck, hash_password, verify_password};
pub use video::{VideoTokenPayload, VideoTokenSigner};

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("site not found: {0}")]
    SiteNotFound(String),
    #[error("no devices bound to site: {0}")]
    NoDevicesBound(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("internal error: {0}")]
    Internal(String),
}

/// 登录返回的会话 token。
pub struct AuthToken {
    pub access_token: String,
    /// 过期时间（Unix 秒时间戳）。
    pub expires_at: u64,
}

/// 认证服务实现（基于 AdminStore + JWT）。
///
/// 会话无服务端状态：有效性完全由签名与过期时间决定，
/// 因此也不存在服务端吊销。
pub struct AuthService {
    admin_store: Arc<dyn AdminStore>,
    jwt: JwtManager,
}

impl AuthService {
    /// 创建认证服务实例。
    pub fn new(admin_store: Arc<dyn AdminStore>, jwt: JwtManager) -> Self {
        Self { admin_store, jwt }
    }

    /// 登录校验并签发会话 token。
    ///
    /// 用户名不存在与口令不匹配返回同一个 `InvalidCredentials`，
    /// 不向调用方泄露账户是否存在。
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(AdminRecord, AuthToken), AuthError> {
        let admin = self
            .admin_store
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let check = verify_password(&admin.password_hash, password)?;
        if !check.verified {
            return Err(AuthError::InvalidCredentials);
        }
        // 旧格式口令在首次成功登录时升级为 argon2 哈希
        if let Some(password_hash) = check.upgrade_hash {
            let updated = self
                .admin_store
                .update_password_hash(admin.admin_id, &password_hash)
                .await?;
            if !updated {
                return Err(AuthError::Internal(
                    "password migration update failed".to_string(),
                ));
            }
        }
        let token = self.jwt.issue(admin.admin_id, &admin.username)?;
        Ok((admin, token))
    }

    /// 校验会话 token 并提取管理员上下文。
    pub fn verify_access_token(&self, token: &str) -> Result<AdminContext, AuthError> {
        self.jwt.decode(token)
    }
}

/// 视频访问 Token 服务。
///
/// 签发前置条件依次检查（任一失败立即返回）：
/// 站点存在 → 频道列表非空 → 站点至少绑定一台设备。
pub struct VideoTokenService {
    site_store: Arc<dyn SiteStore>,
    device_store: Arc<dyn DeviceStore>,
    signer: VideoTokenSigner,
}

impl VideoTokenService {
    /// 创建视频 Token 服务实例。
    pub fn new(
        site_store: Arc<dyn SiteStore>,
        device_store: Arc<dyn DeviceStore>,
        signer: VideoTokenSigner,
    ) -> Self {
        Self {
            site_store,
            device_store,
            signer,
        }
    }

    /// 为指定站点的一组频道签发视频访问 token。
    pub async fn issue(
        &self,
        site_id: &str,
        channels: Vec<String>,
    ) -> Result<String, AuthError> {
        let site = self
            .site_store
            .find_site_by_external_id(site_id)
            .await?
            .ok_or_else(|| AuthError::SiteNotFound(site_id.to_string()))?;
        if channels.is_empty() {
            return Err(AuthError::InvalidRequest(
                "channels cannot be empty".to_string(),
            ));
        }
        let bound = self
            .device_store
            .count_devices_for_site(&site.site_id)
            .await?;
        if bound == 0 {
            return Err(AuthError::NoDevicesBound(site_id.to_string()));
        }
        self.signer.issue(&site.site_id, channels)
    }

    /// 校验视频 token（供视频分发侧使用）。
    pub fn verify(&self, token: &str) -> Result<VideoTokenPayload, AuthError> {
        self.signer.verify(token)
    }
}
