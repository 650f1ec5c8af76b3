use crate::{AuthError, AuthToken};
use domain::AdminContext;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
/// JWT 内部 claims。
struct Claims {
    sub: String,
    #[serde(rename = "adminId")]
    admin_id: i64,
    username: String,
    iat: usize,
    exp: usize,
}

/// 会话 JWT 生成与校验（单一 HS256 算法）。
pub struct JwtManager {
    secret: Vec<u8>,
    ttl_seconds: u64,
}

impl JwtManager {
    /// 创建 JWT 管理器。
    pub fn new(secret: String, ttl_seconds: u64) -> Self {
        Self {
            secret: secret.into_bytes(),
            ttl_seconds,
        }
    }

    /// 为已验证的管理员签发会话 token。
    pub fn issue(&self, admin_id: i64, username: &str) -> Result<AuthToken, AuthError> {
        let iat = now_epoch_seconds();
        let exp = iat + self.ttl_seconds;
        let claims = Claims {
            sub: admin_id.to_string(),
            admin_id,
            username: username.to_string(),
            iat: iat as usize,
            exp: exp as usize,
        };
        let access_token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| AuthError::Internal(err.to_string()))?;
        Ok(AuthToken {
            access_token,
            expires_at: exp,
        })
    }

    /// 解析会话 token，校验签名、算法与过期时间。
    pub fn decode(&self, token: &str) -> Result<AdminContext, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // 过期判定不留余量
        validation.leeway = 0;
        let decoded = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(map_jwt_error)?;
        Ok(AdminContext::new(
            decoded.claims.admin_id,
            decoded.claims.username,
        ))
    }
}

/// 当前时间戳（秒）。
fn now_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// 将 jwt 库错误映射为业务错误。
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenInvalid,
    }
}
