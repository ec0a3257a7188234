//! Outbound email for address verification

pub mod mock_email;
pub mod smtp;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use mv_core::services::verification::EmailSenderTrait;
use mv_shared::config::EmailConfig;

pub use mock_email::MockEmailSender;
pub use smtp::SmtpEmailSender;

use crate::InfrastructureError;

/// Create the email sender named by `config.provider`
pub fn create_email_sender(config: &EmailConfig) -> Result<Arc<dyn EmailSenderTrait>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => Ok(Arc::new(MockEmailSender::new())),
        "smtp" => Ok(Arc::new(SmtpEmailSender::new(config)?)),
        other => Err(InfrastructureError::Config(format!(
            "Unsupported email provider '{}'",
            other
        ))),
    }
}
