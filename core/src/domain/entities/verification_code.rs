//! Verification code entity for image captchas and SMS one-time codes.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::expiry_after;

/// Default length of an SMS verification code
pub const CODE_LENGTH: usize = 6;

/// Which credential a stored code belongs to.
///
/// The kind decides the cache key namespace, so an image challenge id can
/// never collide with a mobile number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    /// Captcha text keyed by the client-chosen challenge id
    ImageCode,
    /// Numeric one-time code keyed by mobile number
    SmsCode,
}

impl CodeKind {
    /// Cache key prefix for this kind
    pub fn key_prefix(&self) -> &'static str {
        match self {
            CodeKind::ImageCode => "img",
            CodeKind::SmsCode => "sms",
        }
    }

    /// Cache key holding the live code of `subject`
    pub fn cache_key(&self, subject: &str) -> String {
        format!("{}_{}", self.key_prefix(), subject)
    }
}

impl std::fmt::Display for CodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeKind::ImageCode => write!(f, "image_code"),
            CodeKind::SmsCode => write!(f, "sms_code"),
        }
    }
}

/// A code as it was written to the store.
///
/// Values are immutable; a reissue writes a fresh entity under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Challenge id or mobile number the code is bound to
    pub subject: String,

    /// The code text
    pub code: String,

    /// Credential kind
    pub kind: CodeKind,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the store drops the code
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a code that lives for `ttl_secs` from now
    pub fn new(subject: impl Into<String>, code: impl Into<String>, kind: CodeKind, ttl_secs: u64) -> Self {
        let now = Utc::now();
        Self {
            subject: subject.into(),
            code: code.into(),
            kind,
            created_at: now,
            expires_at: expiry_after(now, ttl_secs),
        }
    }

    /// Creates an SMS code with `length` random digits
    pub fn new_sms(subject: impl Into<String>, length: usize, ttl_secs: u64) -> Self {
        Self::new(subject, Self::generate_numeric_code(length), CodeKind::SmsCode, ttl_secs)
    }

    /// Generates a zero-padded numeric code with `length` digits
    pub fn generate_numeric_code(length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Cache key this code is stored under
    pub fn cache_key(&self) -> String {
        self.kind.cache_key(&self.subject)
    }

    /// Checks if the verification code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Seconds until the code expires, zero once expired
    pub fn seconds_until_expiration(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

#[cfg(test)]
#[path = "tests/verification_code_tests.rs"]
mod tests;
