//! 工具模块：响应构造与输入规整。

pub mod response;

use axum::response::Response;
use self::response::bad_request_error;

/// 规整必填字符串字段：去除首尾空格，空值返回 400。
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// 规整可选字符串字段：提供了就按必填规则处理，未提供原样通过。
pub fn normalize_optional(value: Option<String>, field: &str) -> Result<Option<String>, Response> {
    match value {
        Some(value) => normalize_required(value, field).map(Some),
        None => Ok(None),
    }
}
