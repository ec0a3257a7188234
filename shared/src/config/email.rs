//! Email delivery configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// SMTP settings for verification emails
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery provider ("smtp", "mock")
    pub provider: String,
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP port
    pub smtp_port: u16,
    /// SMTP username
    pub username: String,
    /// SMTP password or authorization code
    #[serde(skip_serializing)]
    pub password: String,
    /// Use STARTTLS instead of implicit TLS
    pub use_starttls: bool,
    /// Sender display name
    pub from_name: String,
    /// Sender address
    pub from_email: String,
    /// SMTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            smtp_host: "smtp.163.com".to_string(),
            smtp_port: 465,
            username: String::new(),
            password: String::new(),
            use_starttls: false,
            from_name: "Mall".to_string(),
            from_email: "noreply@mall.local".to_string(),
            timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            smtp_host: std::env::var("EMAIL_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: env_or("EMAIL_PORT", defaults.smtp_port),
            username: std::env::var("EMAIL_HOST_USER").unwrap_or_default(),
            password: std::env::var("EMAIL_HOST_PASSWORD").unwrap_or_default(),
            use_starttls: env_or("EMAIL_USE_STARTTLS", defaults.use_starttls),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
            from_email: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_email),
            timeout_secs: env_or("EMAIL_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }

    /// `Name <address>` mailbox string for the From header
    pub fn from_mailbox(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}
