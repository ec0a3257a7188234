//! Configuration for the email token service

use mv_shared::config::VerificationConfig;

use crate::domain::entities::email_token::DEFAULT_EMAIL_TOKEN_TTL_SECS;

/// Configuration for the email token service
#[derive(Debug, Clone)]
pub struct EmailTokenConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_secs: u64,
}

impl Default for EmailTokenConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            ttl_secs: DEFAULT_EMAIL_TOKEN_TTL_SECS,
        }
    }
}

impl From<&VerificationConfig> for EmailTokenConfig {
    fn from(settings: &VerificationConfig) -> Self {
        Self {
            secret: settings.secret_key.clone(),
            ttl_secs: settings.email_token_ttl_secs,
        }
    }
}
