//! Twilio SMS Service Implementation
//!
//! Sends verification messages through the Twilio API. Mainland numbers
//! arrive without a country code and are normalized to E.164 with `+86`.

use async_trait::async_trait;
use phonenumber::{country, Mode};
use tracing::{debug, error, info};
use twilio::{Client, OutboundMessage};

use mv_shared::config::SmsConfig;
use mv_shared::utils::phone::mask_phone_number;

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Twilio message body limit
const MAX_MESSAGE_LEN: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
}

impl TryFrom<&SmsConfig> for TwilioConfig {
    type Error = InfrastructureError;

    fn try_from(config: &SmsConfig) -> Result<Self, Self::Error> {
        config
            .validate()
            .map_err(|e| InfrastructureError::Config(e.to_string()))?;

        Ok(Self {
            account_sid: config.api_key.clone(),
            auth_token: config.api_secret.clone(),
            from_number: config.from_number.clone(),
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );

        Self { client, config }
    }

    /// Validate and normalize phone number to E.164 format
    pub(crate) fn normalize_phone_number(phone: &str) -> Result<String, InfrastructureError> {
        let parsed = phonenumber::parse(Some(country::Id::CN), phone).map_err(|e| {
            InfrastructureError::Sms(format!("Invalid phone number format: {}", e))
        })?;

        if !phonenumber::is_valid(&parsed) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_phone_number(phone)
            )));
        }

        let formatted = parsed.format().mode(Mode::E164).to_string();
        debug!("Validated phone number: {}", mask_phone_number(&formatted));
        Ok(formatted)
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let to = Self::normalize_phone_number(phone_number)?;

        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LEN
            )));
        }

        let outbound = OutboundMessage::new(&self.config.from_number, &to, message);
        match self.client.send_message(outbound).await {
            Ok(response) => {
                info!(
                    phone = %mask_phone_number(&to),
                    sid = %response.sid,
                    "SMS sent via Twilio"
                );
                Ok(response.sid)
            }
            Err(e) => {
                error!(phone = %mask_phone_number(&to), error = %e, "Twilio rejected SMS");
                Err(InfrastructureError::Sms(format!("Twilio request failed: {}", e)))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
