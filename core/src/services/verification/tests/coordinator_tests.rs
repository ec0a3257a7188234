//! Unit tests for the verification coordinator

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::errors::{DomainError, TokenError, VerificationError};
use crate::services::token::EmailTokenConfig;
use crate::services::verification::{
    EmailDispatch, RequestSmsCode, SmsCodeCheck, SmsDelivery, VerificationCoordinator,
    VerificationServiceConfig, CAPTCHA_CONTENT_TYPE,
};

use super::mocks::{MockCacheStore, MockEmailSender, MockSmsGateway};

const MOBILE: &str = "13812345678";

type Coordinator = VerificationCoordinator<MockCacheStore, MockSmsGateway, MockEmailSender>;

struct Harness {
    store: Arc<MockCacheStore>,
    sms: Arc<MockSmsGateway>,
    email: Arc<MockEmailSender>,
    coordinator: Coordinator,
}

fn harness_with(store_fails: bool, sms_fails: bool, email_fails: bool) -> Harness {
    let store = Arc::new(MockCacheStore::new(store_fails));
    let sms = Arc::new(MockSmsGateway::new(sms_fails));
    let email = Arc::new(MockEmailSender::new(email_fails));
    let config = VerificationServiceConfig {
        email_verify_url: "http://www.meiduo.site/success_verify_email.html".to_string(),
        ..VerificationServiceConfig::default()
    };
    let token_config = EmailTokenConfig {
        secret: "coordinator-test-secret-with-plenty-of-bytes".to_string(),
        ttl_secs: 3600,
    };
    let coordinator = VerificationCoordinator::new(
        store.clone(),
        sms.clone(),
        email.clone(),
        config,
        token_config,
    );

    Harness {
        store,
        sms,
        email,
        coordinator,
    }
}

fn harness() -> Harness {
    harness_with(false, false, false)
}

async fn captcha_answer(h: &Harness, challenge_id: &str) -> String {
    h.coordinator.request_image_code(challenge_id).await.unwrap();
    h.store.raw_get(&format!("img_{}", challenge_id)).unwrap()
}

fn sms_request(challenge_id: &str, image_code: &str) -> RequestSmsCode {
    RequestSmsCode {
        mobile: MOBILE.to_string(),
        challenge_id: Some(challenge_id.to_string()),
        image_code: Some(image_code.to_string()),
    }
}

#[tokio::test]
async fn test_request_image_code() {
    let h = harness();
    let response = h.coordinator.request_image_code("challenge-1").await.unwrap();

    assert_eq!(response.challenge_id, "challenge-1");
    assert_eq!(response.content_type, CAPTCHA_CONTENT_TYPE);
    assert!(!response.image.is_empty());
}

#[tokio::test]
async fn test_request_image_code_requires_id() {
    let h = harness();
    let result = h.coordinator.request_image_code("  ").await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::MissingParameter { .. }))
    ));
}

#[tokio::test]
async fn test_full_sms_flow() {
    let h = harness();
    let answer = captcha_answer(&h, "challenge-1").await;

    let sent = h
        .coordinator
        .request_sms_code(sms_request("challenge-1", &answer.to_lowercase()))
        .await
        .unwrap();
    assert_eq!(sent.expires_in_secs, 300);
    assert!(matches!(sent.delivery, SmsDelivery::Sent { .. }));

    let code = h.sms.get_sent_code(MOBILE).unwrap();
    assert_eq!(code.len(), 6);

    let check = h.coordinator.validate_sms_code(MOBILE, &code).await.unwrap();
    assert_eq!(check, SmsCodeCheck::Valid);

    // Consumed
    let replay = h.coordinator.validate_sms_code(MOBILE, &code).await.unwrap();
    assert_eq!(replay, SmsCodeCheck::Expired);
}

#[tokio::test]
async fn test_sms_request_missing_parameters() {
    let h = harness();

    let no_image_code = RequestSmsCode {
        mobile: MOBILE.to_string(),
        challenge_id: Some("challenge-1".to_string()),
        image_code: None,
    };
    match h.coordinator.request_sms_code(no_image_code).await.unwrap_err() {
        DomainError::Verification(VerificationError::MissingParameter { field }) => {
            assert_eq!(field, "image_code");
        }
        other => panic!("Expected missing parameter, got {:?}", other),
    }

    let no_challenge = RequestSmsCode {
        mobile: MOBILE.to_string(),
        challenge_id: Some(" ".to_string()),
        image_code: Some("ABCD".to_string()),
    };
    match h.coordinator.request_sms_code(no_challenge).await.unwrap_err() {
        DomainError::Verification(VerificationError::MissingParameter { field }) => {
            assert_eq!(field, "challenge_id");
        }
        other => panic!("Expected missing parameter, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sms_request_invalid_mobile() {
    let h = harness();
    let request = RequestSmsCode {
        mobile: "12345".to_string(),
        challenge_id: Some("challenge-1".to_string()),
        image_code: Some("ABCD".to_string()),
    };

    let result = h.coordinator.request_sms_code(request).await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::InvalidParameter { .. }))
    ));
}

#[tokio::test]
async fn test_sms_request_wrong_image_code() {
    let h = harness();
    captcha_answer(&h, "challenge-1").await;

    let result = h.coordinator.request_sms_code(sms_request("challenge-1", "????")).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Verification(VerificationError::Mismatch)
    );
    assert_eq!(h.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_sms_request_throttled_before_consuming_captcha() {
    let h = harness();
    let first = captcha_answer(&h, "challenge-1").await;
    h.coordinator
        .request_sms_code(sms_request("challenge-1", &first))
        .await
        .unwrap();

    let second = captcha_answer(&h, "challenge-2").await;
    let result = h.coordinator.request_sms_code(sms_request("challenge-2", &second)).await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::Throttled { .. }))
    ));

    // The second captcha was not spent
    assert_eq!(h.store.raw_get("img_challenge-2"), Some(second));
}

#[tokio::test]
async fn test_country_code_spelling_shares_throttle() {
    let h = harness();
    let first = captcha_answer(&h, "challenge-1").await;
    h.coordinator
        .request_sms_code(sms_request("challenge-1", &first))
        .await
        .unwrap();

    let second = captcha_answer(&h, "challenge-2").await;
    let request = RequestSmsCode {
        mobile: "+8613812345678".to_string(),
        challenge_id: Some("challenge-2".to_string()),
        image_code: Some(second),
    };
    let result = h.coordinator.request_sms_code(request).await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::Throttled { .. }))
    ));
    assert_eq!(h.sms.sent_count(), 1);
    assert!(h.store.raw_get("sms_+8613812345678").is_none());
}

#[tokio::test]
async fn test_sms_issued_with_country_code_uses_bare_key() {
    let h = harness();
    let answer = captcha_answer(&h, "challenge-1").await;
    let request = RequestSmsCode {
        mobile: "+8613812345678".to_string(),
        challenge_id: Some("challenge-1".to_string()),
        image_code: Some(answer),
    };
    h.coordinator.request_sms_code(request).await.unwrap();

    let code = h.sms.get_sent_code(MOBILE).unwrap();
    assert_eq!(h.store.raw_get("sms_13812345678"), Some(code.clone()));
    assert_eq!(
        h.coordinator.validate_sms_code("+8613812345678", &code).await.unwrap(),
        SmsCodeCheck::Valid
    );
}

#[tokio::test]
async fn test_sms_request_after_expiry() {
    let h = harness();
    let first = captcha_answer(&h, "challenge-1").await;
    h.coordinator
        .request_sms_code(sms_request("challenge-1", &first))
        .await
        .unwrap();
    h.store.expire("sms_13812345678");

    let second = captcha_answer(&h, "challenge-2").await;
    assert!(h
        .coordinator
        .request_sms_code(sms_request("challenge-2", &second))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_gateway_failure_still_issues_code() {
    let h = harness_with(false, true, false);
    let answer = captcha_answer(&h, "challenge-1").await;

    let sent = h
        .coordinator
        .request_sms_code(sms_request("challenge-1", &answer))
        .await
        .unwrap();

    assert!(matches!(sent.delivery, SmsDelivery::Failed { .. }));
    assert!(h.store.raw_get("sms_13812345678").is_some());
}

#[tokio::test]
async fn test_store_outage() {
    let h = harness_with(true, false, false);

    let result = h.coordinator.request_image_code("challenge-1").await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::StoreUnavailable { .. }))
    ));

    let result = h.coordinator.validate_sms_code(MOBILE, "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::StoreUnavailable { .. }))
    ));
}

#[tokio::test]
async fn test_validate_sms_code_outcomes() {
    let h = harness();
    assert_eq!(
        h.coordinator.validate_sms_code(MOBILE, "123456").await.unwrap(),
        SmsCodeCheck::Expired
    );

    let answer = captcha_answer(&h, "challenge-1").await;
    h.coordinator
        .request_sms_code(sms_request("challenge-1", &answer))
        .await
        .unwrap();
    let code = h.sms.get_sent_code(MOBILE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    assert_eq!(
        h.coordinator.validate_sms_code(MOBILE, wrong).await.unwrap(),
        SmsCodeCheck::Invalid
    );
    assert_eq!(
        h.coordinator.validate_sms_code(MOBILE, &code).await.unwrap(),
        SmsCodeCheck::Valid
    );
}

#[tokio::test]
async fn test_validate_sms_code_requires_candidate() {
    let h = harness();
    let result = h.coordinator.validate_sms_code(MOBILE, "").await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::MissingParameter { .. }))
    ));
}

#[test]
fn test_email_token_round_trip() {
    let h = harness();
    let token = h.coordinator.issue_email_token(42, "a@example.com").unwrap();
    let verified = h.coordinator.verify_email_token(&token).unwrap();

    assert_eq!(verified.user_id, 42);
    assert_eq!(verified.email, "a@example.com");
}

#[test]
fn test_expired_email_token() {
    let h = harness();
    let token = h
        .coordinator
        .tokens()
        .issue_at(42, "a@example.com", Utc::now() - Duration::hours(2))
        .unwrap();

    assert_eq!(
        h.coordinator.verify_email_token(&token).unwrap_err(),
        DomainError::Token(TokenError::Expired)
    );
}

#[tokio::test]
async fn test_send_verification_email() {
    let h = harness();
    let dispatch = h
        .coordinator
        .send_verification_email(7, "user@qq.com")
        .await
        .unwrap();
    assert_eq!(dispatch, EmailDispatch::Sent);

    let sent = h.email.last().unwrap();
    assert_eq!(sent.to, "user@qq.com");
    assert_eq!(sent.subject, "美多商城邮箱验证");
    assert!(sent.html_body.contains("user@qq.com"));

    // The link carries a token that verifies to the same subject
    let marker = "success_verify_email.html?token=";
    let start = sent.html_body.find(marker).unwrap() + marker.len();
    let end = start + sent.html_body[start..].find('"').unwrap();
    let token = urlencoding::decode(&sent.html_body[start..end]).unwrap();

    let verified = h.coordinator.verify_email_token(&token).unwrap();
    assert_eq!(verified.user_id, 7);
    assert_eq!(verified.email, "user@qq.com");
}

#[tokio::test]
async fn test_send_verification_email_rejects_bad_address() {
    let h = harness();
    let result = h.coordinator.send_verification_email(7, "not-an-email").await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::InvalidParameter { .. }))
    ));
    assert!(h.email.last().is_none());
}

#[tokio::test]
async fn test_send_verification_email_delivery_failure() {
    let h = harness_with(false, false, true);
    let dispatch = h
        .coordinator
        .send_verification_email(7, "user@qq.com")
        .await
        .unwrap();
    assert!(matches!(dispatch, EmailDispatch::Failed { .. }));
}
