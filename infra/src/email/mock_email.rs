//! Logging email sender for development

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

use mv_core::services::verification::EmailSenderTrait;
use mv_shared::utils::email::mask_email;

/// Logs outgoing mail instead of sending it
#[derive(Clone, Default)]
pub struct MockEmailSender {
    sent_count: Arc<AtomicU64>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSenderTrait for MockEmailSender {
    async fn send_html(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let count = self.sent_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "email_service",
            provider = "mock",
            to = %mask_email(to),
            subject = %subject,
            count = count,
            body = %html_body,
            "Email sent successfully (mock)"
        );

        Ok(())
    }
}
