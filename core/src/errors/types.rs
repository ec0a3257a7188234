//! Error types for verification codes and signed tokens
//!
//! Messages are bilingual (`English | 中文`); the presentation layer picks
//! one half with [`extract_english_message`] or [`extract_chinese_message`].

use thiserror::Error;

/// Image code and SMS code failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Missing required parameter: {field} | 缺少必传参数: {field}")]
    MissingParameter { field: String },

    #[error("Invalid parameter: {field} | 参数有误: {field}")]
    InvalidParameter { field: String },

    #[error("Verification code expired or not found | 验证码已失效")]
    ExpiredOrMissing,

    #[error("Verification code does not match | 验证码有误")]
    Mismatch,

    #[error("Code requested too frequently, retry in {retry_after_secs} seconds | 发送短信过于频繁")]
    Throttled { retry_after_secs: u64 },

    #[error("Delivery failed: {message} | 发送失败: {message}")]
    DeliveryFailed { message: String },

    #[error("Verification store unavailable: {message} | 验证码服务暂不可用")]
    StoreUnavailable { message: String },
}

impl VerificationError {
    /// Stable identifier for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::MissingParameter { .. } => "MISSING_PARAMETER",
            VerificationError::InvalidParameter { .. } => "INVALID_PARAMETER",
            VerificationError::ExpiredOrMissing => "CODE_EXPIRED_OR_MISSING",
            VerificationError::Mismatch => "CODE_MISMATCH",
            VerificationError::Throttled { .. } => "THROTTLED",
            VerificationError::DeliveryFailed { .. } => "DELIVERY_FAILED",
            VerificationError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
        }
    }

    /// Whether repeating the same request later can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VerificationError::Throttled { .. }
                | VerificationError::StoreUnavailable { .. }
                | VerificationError::DeliveryFailed { .. }
        )
    }
}

/// Signed token failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature verification failed | 无效的token")]
    SignatureInvalid,

    #[error("Token expired | token已过期")]
    Expired,

    #[error("Token generation failed | 令牌生成失败")]
    GenerationFailed,
}

impl TokenError {
    /// Stable identifier for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::SignatureInvalid => "SIGNATURE_INVALID",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// English half of a bilingual message
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message).trim()
}

/// Chinese half of a bilingual message, or the whole message when there is none
pub fn extract_chinese_message(message: &str) -> &str {
    message
        .split_once(" | ")
        .map(|(_, zh)| zh.trim())
        .unwrap_or(message)
}
