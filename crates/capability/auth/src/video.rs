use crate::AuthError;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// 视频 Token 有效期：24 小时。
const VIDEO_TOKEN_TTL_SECONDS: i64 = 86_400;

/// 视频 Token 的 payload。
///
/// 字段顺序即序列化顺序，签名覆盖序列化后的完整字节串。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTokenPayload {
    pub channels: Vec<String>,
    pub site_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// 视频 Token 签名与校验。
///
/// Token 格式：`base64url(payload JSON) + "." + hex(HMAC-SHA256(payload))`。
/// 密钥与会话 JWT 密钥相互独立。
pub struct VideoTokenSigner {
    secret: Vec<u8>,
}

impl VideoTokenSigner {
    /// 创建签名器。
    pub fn new(secret: String) -> Self {
        Self {
            secret: secret.into_bytes(),
        }
    }

    /// 以当前时间为起点为站点/频道组合签发 token。
    pub fn issue(&self, site_id: &str, channels: Vec<String>) -> Result<String, AuthError> {
        let iat = now_epoch_seconds();
        let payload = VideoTokenPayload {
            channels,
            site_id: site_id.to_string(),
            iat,
            exp: iat + VIDEO_TOKEN_TTL_SECONDS,
        };
        self.sign(&payload)
    }

    /// 对给定 payload 签名，返回完整 token。
    pub fn sign(&self, payload: &VideoTokenPayload) -> Result<String, AuthError> {
        let payload_bytes = serde_json::to_vec(payload)
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        mac.update(&payload_bytes);
        let signature = mac.finalize().into_bytes();
        Ok(format!(
            "{}.{}",
            URL_SAFE.encode(&payload_bytes),
            hex::encode(signature)
        ))
    }

    /// 校验 token：签名优先于过期判定。
    pub fn verify(&self, token: &str) -> Result<VideoTokenPayload, AuthError> {
        let (payload_b64, signature_hex) =
            token.split_once('.').ok_or(AuthError::TokenInvalid)?;
        let payload_bytes = URL_SAFE
            .decode(payload_b64)
            .map_err(|_| AuthError::TokenInvalid)?;
        let signature = hex::decode(signature_hex).map_err(|_| AuthError::TokenInvalid)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        mac.update(&payload_bytes);
        // verify_slice 内部为常量时间比较
        if mac.verify_slice(&signature).is_err() {
            return Err(AuthError::InvalidSignature);
        }

        let payload: VideoTokenPayload =
            serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::TokenInvalid)?;
        if payload.exp < now_epoch_seconds() {
            return Err(AuthError::TokenExpired);
        }
        Ok(payload)
    }
}

/// 当前时间戳（秒）。
fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
