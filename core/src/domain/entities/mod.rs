//! Domain entities representing stored or signed verification credentials.

use chrono::{DateTime, Duration, Utc};

pub mod email_token;
pub mod verification_code;

// Re-export commonly used types
pub use email_token::{EmailTokenClaims, VerifiedEmail, DEFAULT_EMAIL_TOKEN_TTL_SECS};
pub use verification_code::{CodeKind, VerificationCode, CODE_LENGTH};

/// `start` plus `ttl_secs`, clamped to the latest representable instant
pub(crate) fn expiry_after(start: DateTime<Utc>, ttl_secs: u64) -> DateTime<Utc> {
    i64::try_from(ttl_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| start.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
