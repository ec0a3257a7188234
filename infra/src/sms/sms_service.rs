//! SMS Service Interface
//!
//! Defines the provider-level trait for sending text messages. The core
//! verification code only sees `SmsGatewayTrait`; [`super::SmsGateway`]
//! bridges the two.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS provider trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message, returning the provider message id
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}

/// Text of a verification code message
pub fn verification_message(code: &str, valid_minutes: u64) -> String {
    format!(
        "【美多商城】您的验证码为{}，{}分钟内有效，请勿泄露给他人。",
        code, valid_minutes
    )
}
