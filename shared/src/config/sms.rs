//! SMS gateway configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("twilio", "mock")
    pub provider: String,
    /// API credentials
    pub api_key: String,
    /// API secret/token
    pub api_secret: String,
    /// From phone number
    pub from_number: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            from_number: "+1234567890".to_string(),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_key: std::env::var("SMS_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("SMS_API_SECRET").unwrap_or_default(),
            from_number: std::env::var("SMS_FROM_NUMBER")
                .unwrap_or_else(|_| "+1234567890".to_string()),
        }
    }

    /// Real providers need credentials and an E.164 sender number
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider == "mock" {
            return Ok(());
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::Missing {
                field: "SMS_API_KEY".to_string(),
            });
        }
        if self.api_secret.is_empty() {
            return Err(ConfigError::Missing {
                field: "SMS_API_SECRET".to_string(),
            });
        }
        if !self.from_number.starts_with('+') {
            return Err(ConfigError::invalid(
                "SMS_FROM_NUMBER",
                "must be in E.164 format (starting with '+')",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_needs_no_credentials() {
        assert!(SmsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_twilio_requires_credentials() {
        let config = SmsConfig {
            provider: "twilio".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing {
                field: "SMS_API_KEY".to_string()
            })
        );

        let config = SmsConfig {
            provider: "twilio".to_string(),
            api_key: "AC123".to_string(),
            api_secret: "token".to_string(),
            from_number: "15550100".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
