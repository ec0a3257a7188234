//! Bridge from provider-level SMS services to the core gateway trait

use async_trait::async_trait;

use mv_core::services::verification::SmsGatewayTrait;

use super::sms_service::{verification_message, SmsService};

/// Formats verification messages and hands them to an [`SmsService`]
pub struct SmsGateway {
    inner: Box<dyn SmsService>,
    valid_minutes: u64,
}

impl SmsGateway {
    /// `code_ttl_secs` is quoted in the message, rounded up to whole minutes
    pub fn new(inner: Box<dyn SmsService>, code_ttl_secs: u64) -> Self {
        Self {
            inner,
            valid_minutes: code_ttl_secs.div_ceil(60).max(1),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    pub async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}

#[async_trait]
impl SmsGatewayTrait for SmsGateway {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        let message = verification_message(code, self.valid_minutes);
        self.inner
            .send_sms(phone, &message)
            .await
            .map_err(|e| e.to_string())
    }
}
