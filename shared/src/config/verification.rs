//! Verification code and signed token configuration

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError, Environment};

/// Secret used when `SECRET_KEY` is not provided. Rejected in production.
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Minimum signing secret length accepted in production
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Longest accepted image or SMS code lifetime (one day)
pub const MAX_CODE_TTL_SECS: u64 = 86_400;

/// Longest accepted email token lifetime (30 days)
pub const MAX_EMAIL_TOKEN_TTL_SECS: u64 = 30 * 86_400;

/// Lifetimes, lengths and signing material for verification credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Image code (captcha) lifetime in seconds
    #[serde(default = "default_image_code_ttl")]
    pub image_code_ttl_secs: u64,

    /// SMS code lifetime in seconds. A live SMS code blocks reissue for the
    /// same mobile, so this is also the minimum reissue interval.
    #[serde(default = "default_sms_code_ttl")]
    pub sms_code_ttl_secs: u64,

    /// Number of digits in an SMS code
    #[serde(default = "default_sms_code_length")]
    pub sms_code_length: usize,

    /// Number of characters in a captcha challenge
    #[serde(default = "default_captcha_length")]
    pub captcha_length: usize,

    /// Email verification token lifetime in seconds
    #[serde(default = "default_email_token_ttl")]
    pub email_token_ttl_secs: u64,

    /// HMAC secret for email verification tokens
    pub secret_key: String,

    /// Base URL the email verification link points at
    #[serde(default = "default_email_verify_url")]
    pub email_verify_url: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            image_code_ttl_secs: default_image_code_ttl(),
            sms_code_ttl_secs: default_sms_code_ttl(),
            sms_code_length: default_sms_code_length(),
            captcha_length: default_captcha_length(),
            email_token_ttl_secs: default_email_token_ttl(),
            secret_key: DEVELOPMENT_SECRET.to_string(),
            email_verify_url: default_email_verify_url(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            image_code_ttl_secs: env_or("IMAGE_CODE_TTL_SECS", defaults.image_code_ttl_secs),
            sms_code_ttl_secs: env_or("SMS_CODE_TTL_SECS", defaults.sms_code_ttl_secs),
            sms_code_length: env_or("SMS_CODE_LENGTH", defaults.sms_code_length),
            captcha_length: env_or("CAPTCHA_LENGTH", defaults.captcha_length),
            email_token_ttl_secs: env_or("EMAIL_TOKEN_TTL_SECS", defaults.email_token_ttl_secs),
            secret_key: std::env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            email_verify_url: std::env::var("EMAIL_VERIFY_URL")
                .unwrap_or(defaults.email_verify_url),
        }
    }

    /// Check lifetimes, lengths and secret strength
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        for (field, ttl, max) in [
            ("IMAGE_CODE_TTL_SECS", self.image_code_ttl_secs, MAX_CODE_TTL_SECS),
            ("SMS_CODE_TTL_SECS", self.sms_code_ttl_secs, MAX_CODE_TTL_SECS),
            ("EMAIL_TOKEN_TTL_SECS", self.email_token_ttl_secs, MAX_EMAIL_TOKEN_TTL_SECS),
        ] {
            if ttl == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
            if ttl > max {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be at most {} seconds", max),
                ));
            }
        }

        if !(4..=10).contains(&self.sms_code_length) {
            return Err(ConfigError::invalid("SMS_CODE_LENGTH", "must be between 4 and 10"));
        }
        if !(4..=8).contains(&self.captcha_length) {
            return Err(ConfigError::invalid("CAPTCHA_LENGTH", "must be between 4 and 8"));
        }

        if self.secret_key.is_empty() {
            return Err(ConfigError::Missing {
                field: "SECRET_KEY".to_string(),
            });
        }
        if environment.is_production()
            && (self.secret_key == DEVELOPMENT_SECRET
                || self.secret_key.len() < MIN_PRODUCTION_SECRET_LEN)
        {
            return Err(ConfigError::invalid(
                "SECRET_KEY",
                format!(
                    "production requires a dedicated secret of at least {} bytes",
                    MIN_PRODUCTION_SECRET_LEN
                ),
            ));
        }

        Ok(())
    }
}

fn default_image_code_ttl() -> u64 {
    300
}

fn default_sms_code_ttl() -> u64 {
    300
}

fn default_sms_code_length() -> usize {
    6
}

fn default_captcha_length() -> usize {
    4
}

fn default_email_token_ttl() -> u64 {
    3600
}

fn default_email_verify_url() -> String {
    String::from("http://localhost:8080/emails/verification/")
}
