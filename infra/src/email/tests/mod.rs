//! Unit tests for email delivery

use mv_core::services::verification::EmailSenderTrait;
use mv_shared::config::EmailConfig;

use crate::email::{create_email_sender, MockEmailSender, SmtpEmailSender};
use crate::InfrastructureError;

fn smtp_config() -> EmailConfig {
    EmailConfig {
        provider: "smtp".to_string(),
        smtp_host: "smtp.example.com".to_string(),
        smtp_port: 465,
        username: "mailer@example.com".to_string(),
        password: "authorization-code".to_string(),
        use_starttls: false,
        from_name: "美多商城".to_string(),
        from_email: "mailer@example.com".to_string(),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_build_message() {
    let sender = SmtpEmailSender::new(&smtp_config()).unwrap();

    let message = sender
        .build_message("user@qq.com", "美多商城邮箱验证", "<p>hello</p>")
        .unwrap();
    let formatted = String::from_utf8(message.formatted()).unwrap();
    assert!(formatted.contains("To: user@qq.com"));
    assert!(formatted.contains("Content-Type: text/html"));
}

#[tokio::test]
async fn test_build_message_rejects_bad_recipient() {
    let sender = SmtpEmailSender::new(&smtp_config()).unwrap();

    let result = sender.build_message("not an address", "subject", "<p>hello</p>");
    assert!(matches!(result, Err(InfrastructureError::Email(_))));
}

#[tokio::test]
async fn test_invalid_from_address() {
    let config = EmailConfig {
        from_email: "broken".to_string(),
        ..smtp_config()
    };
    assert!(matches!(
        SmtpEmailSender::new(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[tokio::test]
async fn test_mock_sender_counts() {
    let sender = MockEmailSender::new();
    sender.send_html("user@qq.com", "subject", "<p>hi</p>").await.unwrap();
    sender.send_html("user@qq.com", "subject", "<p>hi</p>").await.unwrap();
    assert_eq!(sender.sent_count(), 2);
}

#[test]
fn test_create_email_sender() {
    assert!(create_email_sender(&EmailConfig::default()).is_ok());

    let config = EmailConfig {
        provider: "fax".to_string(),
        ..EmailConfig::default()
    };
    assert!(matches!(
        create_email_sender(&config),
        Err(InfrastructureError::Config(_))
    ));
}
