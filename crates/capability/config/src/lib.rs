//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub database_url: String,
    /// 管理员会话 JWT 签名密钥。
    pub jwt_secret: String,
    /// 会话 token 有效期（分钟）。
    pub jwt_ttl_minutes: u64,
    /// 视频访问 Token 签名密钥，与 JWT 密钥相互独立。
    pub video_token_secret: String,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("ICCTV_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("ICCTV_DATABASE_URL".to_string()))?;
        let jwt_secret = env::var("ICCTV_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("ICCTV_JWT_SECRET".to_string()))?;
        let video_token_secret = env::var("ICCTV_VIDEO_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("ICCTV_VIDEO_TOKEN_SECRET".to_string()))?;
        let jwt_ttl_minutes = read_u64_with_default("ICCTV_JWT_TTL_MINUTES", 120)?;
        let http_addr =
            env::var("ICCTV_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        Ok(Self {
            http_addr,
            database_url,
            jwt_secret,
            jwt_ttl_minutes,
            video_token_secret,
        })
    }
}

/// 读取 u64 类型环境变量（缺省时取默认值）。
fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}
