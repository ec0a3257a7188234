//! Unit tests for domain error types

use crate::errors::{
    extract_chinese_message, extract_english_message, DomainError, TokenError, VerificationError,
};

#[test]
fn test_verification_error_messages_are_bilingual() {
    let error = VerificationError::MissingParameter {
        field: "image_code".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("Missing required parameter: image_code"));
    assert!(message.contains("缺少必传参数"));
}

#[test]
fn test_error_codes() {
    assert_eq!(VerificationError::ExpiredOrMissing.error_code(), "CODE_EXPIRED_OR_MISSING");
    assert_eq!(
        VerificationError::Throttled { retry_after_secs: 60 }.error_code(),
        "THROTTLED"
    );
    assert_eq!(TokenError::SignatureInvalid.error_code(), "SIGNATURE_INVALID");

    let wrapped: DomainError = TokenError::Expired.into();
    assert_eq!(wrapped.error_code(), "TOKEN_EXPIRED");
}

#[test]
fn test_retryable_classification() {
    assert!(VerificationError::StoreUnavailable {
        message: "connection refused".to_string()
    }
    .is_retryable());
    assert!(VerificationError::Throttled { retry_after_secs: 1 }.is_retryable());
    assert!(!VerificationError::Mismatch.is_retryable());
    assert!(!VerificationError::ExpiredOrMissing.is_retryable());
}

#[test]
fn test_domain_error_is_transparent() {
    let error: DomainError = VerificationError::Mismatch.into();
    assert_eq!(error.to_string(), VerificationError::Mismatch.to_string());
    assert!(matches!(error, DomainError::Verification(VerificationError::Mismatch)));
}

#[test]
fn test_message_extraction() {
    let message = TokenError::Expired.to_string();
    assert_eq!(extract_english_message(&message), "Token expired");
    assert_eq!(extract_chinese_message(&message), "token已过期");

    let english_only = "Only English";
    assert_eq!(extract_english_message(english_only), "Only English");
    assert_eq!(extract_chinese_message(english_only), "Only English");
}
