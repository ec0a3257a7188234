//! Configuration for the verification services

use mv_shared::config::VerificationConfig;

use crate::domain::entities::verification_code::CODE_LENGTH;
use crate::services::captcha::DEFAULT_CAPTCHA_LENGTH;

/// Configuration for the code issuer and coordinator
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Seconds an image code stays valid
    pub image_code_ttl_secs: u64,
    /// Seconds an SMS code stays valid. A live code blocks reissue, so this
    /// is also the minimum interval between two SMS codes for one mobile.
    pub sms_code_ttl_secs: u64,
    /// Digits in an SMS code
    pub sms_code_length: usize,
    /// Characters in a captcha
    pub captcha_length: usize,
    /// Base URL of the email verification link
    pub email_verify_url: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            image_code_ttl_secs: 300,
            sms_code_ttl_secs: 300,
            sms_code_length: CODE_LENGTH,
            captcha_length: DEFAULT_CAPTCHA_LENGTH,
            email_verify_url: "http://localhost:8080/emails/verification/".to_string(),
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(settings: &VerificationConfig) -> Self {
        Self {
            image_code_ttl_secs: settings.image_code_ttl_secs,
            sms_code_ttl_secs: settings.sms_code_ttl_secs,
            sms_code_length: settings.sms_code_length,
            captcha_length: settings.captcha_length,
            email_verify_url: settings.email_verify_url.clone(),
        }
    }
}
