//! Signed, time-limited email verification tokens

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::email_token::{EmailTokenClaims, VerifiedEmail};
use crate::errors::TokenError;

use super::config::EmailTokenConfig;

/// Issues and verifies HS256 tokens binding a user id to an email address.
///
/// Tokens are never stored. Marking the address as verified, and so making
/// the token single-use in effect, is up to the caller.
pub struct EmailTokenService {
    config: EmailTokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl EmailTokenService {
    pub fn new(config: EmailTokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.config.ttl_secs
    }

    /// Issue a token for `(user_id, email)` valid from now
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub(crate) fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = EmailTokenClaims::new(user_id, email, issued_at, self.config.ttl_secs);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign email verification token");
            TokenError::GenerationFailed
        })
    }

    /// Verify signature and expiry, returning the bound subject
    pub fn verify(&self, token: &str) -> Result<VerifiedEmail, TokenError> {
        let token_data = decode::<EmailTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &ErrorKind::ExpiredSignature {
                    TokenError::Expired
                } else {
                    TokenError::SignatureInvalid
                }
            })?;

        Ok(token_data.claims.into_verified())
    }

    /// Verification link for `token` under `base_url`
    pub fn verify_url(base_url: &str, token: &str) -> String {
        let separator = if base_url.contains('?') { '&' } else { '?' };
        format!("{}{}token={}", base_url, separator, urlencoding::encode(token))
    }
}
