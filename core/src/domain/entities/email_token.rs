//! Claims carried by signed email verification tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::expiry_after;

/// Default lifetime of an email verification token (1 hour)
pub const DEFAULT_EMAIL_TOKEN_TTL_SECS: u64 = 3600;

/// Token payload. The signature covers every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTokenClaims {
    /// User the address belongs to
    pub user_id: i64,

    /// Address being verified
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl EmailTokenClaims {
    /// Claims issued at `issued_at` that stay valid for `ttl_secs`
    pub fn new(user_id: i64, email: impl Into<String>, issued_at: DateTime<Utc>, ttl_secs: u64) -> Self {
        let expiry = expiry_after(issued_at, ttl_secs);
        Self {
            user_id,
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Subject fields of a verified token
    pub fn into_verified(self) -> VerifiedEmail {
        VerifiedEmail {
            user_id: self.user_id,
            email: self.email,
        }
    }
}

/// Subject recovered from a token that passed verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedEmail {
    pub user_id: i64,
    pub email: String,
}
