//! SMS Service Module
//!
//! SMS delivery for verification codes:
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Log output for development
//! - **Twilio Support**: Production SMS via Twilio API (`twilio-sms`)
//! - **Gateway**: Adapter to the core `SmsGatewayTrait`

pub mod gateway;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

use std::sync::Arc;

use mv_core::services::verification::SmsGatewayTrait;
use mv_shared::config::SmsConfig;

// Re-export commonly used types
pub use gateway::SmsGateway;
pub use mock_sms::MockSmsService;
pub use sms_service::{verification_message, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create the SMS service named by `config.provider`
pub fn create_sms_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => Ok(Box::new(MockSmsService::new())),
        #[cfg(feature = "twilio-sms")]
        "twilio" => {
            let twilio_config = TwilioConfig::try_from(config)?;
            Ok(Box::new(TwilioSmsService::new(twilio_config)))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unsupported SMS provider '{}'",
            other
        ))),
    }
}

/// Create the gateway the verification coordinator sends codes through
pub fn create_sms_gateway(
    config: &SmsConfig,
    code_ttl_secs: u64,
) -> Result<Arc<dyn SmsGatewayTrait>, InfrastructureError> {
    let service = create_sms_service(config)?;
    tracing::info!(provider = service.provider_name(), "SMS gateway ready");
    Ok(Arc::new(SmsGateway::new(service, code_ttl_secs)))
}
