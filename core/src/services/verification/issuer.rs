//! Issuing and consuming image codes and SMS codes

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use mv_shared::utils::phone::mask_phone_number;

use crate::domain::entities::verification_code::{CodeKind, VerificationCode};
use crate::domain::value_objects::VerificationStage;
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::services::captcha::{Captcha, CaptchaGenerator};

use super::config::VerificationServiceConfig;
use super::traits::CacheStoreTrait;

/// Stores codes in the expiring store and enforces one-time use.
///
/// All coordination between concurrent requests happens in the store:
/// image codes are consumed with `get_and_delete`, SMS codes are created
/// with `set_if_absent` and consumed with `compare_and_delete`.
pub struct CodeIssuer<C: CacheStoreTrait + ?Sized> {
    store: Arc<C>,
    captcha: CaptchaGenerator,
    config: VerificationServiceConfig,
}

impl<C: CacheStoreTrait + ?Sized> CodeIssuer<C> {
    pub fn new(store: Arc<C>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            captcha: CaptchaGenerator::new(config.captcha_length),
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Render a captcha and store its text under `img_{challenge_id}`.
    ///
    /// Requesting again for the same challenge id replaces the previous text.
    pub async fn issue_image_code(&self, challenge_id: &str) -> DomainResult<Captcha> {
        let captcha = self.captcha.generate_for(challenge_id)?;
        let key = CodeKind::ImageCode.cache_key(challenge_id);

        self.store
            .set_with_expiry(&key, &captcha.text, self.config.image_code_ttl_secs)
            .await
            .map_err(|e| store_unavailable("image_code_store_failed", e))?;

        tracing::info!(
            challenge_id = challenge_id,
            ttl_secs = self.config.image_code_ttl_secs,
            event = "image_code_issued",
            "Issued image code"
        );

        Ok(captcha)
    }

    /// Consume the image code and compare it case-insensitively.
    ///
    /// The entry is removed whatever the outcome, so every captcha answer
    /// gets exactly one attempt.
    pub async fn validate_image_code(&self, challenge_id: &str, candidate: &str) -> DomainResult<()> {
        let key = CodeKind::ImageCode.cache_key(challenge_id);

        let stored = self
            .store
            .get_and_delete(&key)
            .await
            .map_err(|e| store_unavailable("image_code_consume_failed", e))?;

        let Some(stored) = stored else {
            tracing::info!(
                challenge_id = challenge_id,
                event = "image_code_missing",
                "Image code expired or never issued"
            );
            return Err(VerificationError::ExpiredOrMissing.into());
        };

        if !stored.eq_ignore_ascii_case(candidate) {
            tracing::info!(
                challenge_id = challenge_id,
                event = "image_code_mismatch",
                "Image code did not match"
            );
            return Err(VerificationError::Mismatch.into());
        }

        tracing::debug!(challenge_id = challenge_id, event = "image_code_validated", "Image code validated");
        Ok(())
    }

    /// Seconds until a new SMS code may be issued, `None` when allowed now
    pub async fn sms_throttle_remaining(&self, mobile: &str) -> DomainResult<Option<u64>> {
        let key = CodeKind::SmsCode.cache_key(mobile);
        self.store
            .ttl(&key)
            .await
            .map_err(|e| store_unavailable("sms_throttle_check_failed", e))
    }

    /// Generate and store an SMS code unless a live one exists.
    ///
    /// The store's set-if-absent decides between concurrent callers, so
    /// exactly one of them gets a code.
    pub async fn issue_sms_code(&self, mobile: &str) -> DomainResult<VerificationCode> {
        let code = VerificationCode::new_sms(
            mobile,
            self.config.sms_code_length,
            self.config.sms_code_ttl_secs,
        );
        let key = code.cache_key();

        let stored = self
            .store
            .set_if_absent(&key, &code.code, self.config.sms_code_ttl_secs)
            .await
            .map_err(|e| store_unavailable("sms_code_store_failed", e))?;

        if !stored {
            let retry_after_secs = self.sms_throttle_remaining(mobile).await?.unwrap_or(0);
            tracing::warn!(
                phone = %mask_phone_number(mobile),
                retry_after_secs = retry_after_secs,
                event = "sms_code_throttled",
                "SMS code requested while a previous code is still live"
            );
            return Err(VerificationError::Throttled { retry_after_secs }.into());
        }

        tracing::info!(
            phone = %mask_phone_number(mobile),
            ttl_secs = self.config.sms_code_ttl_secs,
            event = "sms_code_issued",
            "Issued SMS code"
        );

        Ok(code)
    }

    /// Check an SMS code and consume it on a match.
    ///
    /// A wrong code leaves the entry in place. When two callers present the
    /// right code at once, only the one whose delete lands succeeds; the
    /// other sees `ExpiredOrMissing`.
    pub async fn validate_sms_code(&self, mobile: &str, candidate: &str) -> DomainResult<()> {
        let key = CodeKind::SmsCode.cache_key(mobile);

        let stored = self
            .store
            .get(&key)
            .await
            .map_err(|e| store_unavailable("sms_code_lookup_failed", e))?
            .ok_or(VerificationError::ExpiredOrMissing)?;

        if !constant_time_eq(stored.as_bytes(), candidate.as_bytes()) {
            tracing::warn!(
                phone = %mask_phone_number(mobile),
                event = "sms_code_mismatch",
                "SMS code did not match"
            );
            return Err(VerificationError::Mismatch.into());
        }

        let consumed = self
            .store
            .compare_and_delete(&key, &stored)
            .await
            .map_err(|e| store_unavailable("sms_code_consume_failed", e))?;

        if !consumed {
            tracing::info!(
                phone = %mask_phone_number(mobile),
                event = "sms_code_already_consumed",
                "SMS code consumed by a concurrent request"
            );
            return Err(VerificationError::ExpiredOrMissing.into());
        }

        tracing::info!(
            phone = %mask_phone_number(mobile),
            event = "sms_code_validated",
            "SMS code validated"
        );
        Ok(())
    }

    /// Stage of a flow as far as the store can tell.
    ///
    /// Validated stages leave no trace once their entries are consumed, so
    /// this only ever reports `NoChallenge`, `ImageIssued` or `SmsIssued`.
    pub async fn current_stage(
        &self,
        challenge_id: Option<&str>,
        mobile: Option<&str>,
    ) -> DomainResult<VerificationStage> {
        if let Some(mobile) = mobile {
            if self.sms_throttle_remaining(mobile).await?.is_some() {
                return Ok(VerificationStage::SmsIssued);
            }
        }

        if let Some(challenge_id) = challenge_id {
            let key = CodeKind::ImageCode.cache_key(challenge_id);
            let live = self
                .store
                .ttl(&key)
                .await
                .map_err(|e| store_unavailable("image_code_lookup_failed", e))?;
            if live.is_some() {
                return Ok(VerificationStage::ImageIssued);
            }
        }

        Ok(VerificationStage::NoChallenge)
    }
}

fn store_unavailable(event: &'static str, message: String) -> DomainError {
    tracing::error!(error = %message, event = event, "Verification store operation failed");
    VerificationError::StoreUnavailable { message }.into()
}
