//! SMTP delivery through lettre

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, error, info};

use mv_core::services::verification::EmailSenderTrait;
use mv_shared::config::EmailConfig;
use mv_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Sends HTML mail through an authenticated SMTP relay
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let from = config.from_mailbox().parse::<Mailbox>().map_err(|e| {
            InfrastructureError::Config(format!("Invalid from address: {}", e))
        })?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = if config.use_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Config(format!("Failed to create SMTP transport: {}", e)))?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            starttls = config.use_starttls,
            "SMTP email sender initialized"
        );

        Ok(Self { transport, from })
    }

    /// Build an HTML message
    pub(crate) fn build_message(&self, to: &str, subject: &str, html_body: &str) -> Result<Message, InfrastructureError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Email(format!("Invalid to address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailSenderTrait for SmtpEmailSender {
    async fn send_html(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        debug!(to = %mask_email(to), subject = %subject, "Sending HTML email");

        let message = self.build_message(to, subject, html_body).map_err(|e| e.to_string())?;

        self.transport.send(message).await.map_err(|e| {
            error!(to = %mask_email(to), error = %e, "SMTP delivery failed");
            InfrastructureError::Email(format!("Failed to send email: {}", e)).to_string()
        })?;

        info!(to = %mask_email(to), subject = %subject, "HTML email sent successfully");
        Ok(())
    }
}
