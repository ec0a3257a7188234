//! Caller-facing verification operations

use std::sync::Arc;

use mv_shared::utils::email::{is_valid_email, mask_email};
use mv_shared::utils::phone::{canonical_mobile, mask_phone_number};

use crate::domain::entities::email_token::VerifiedEmail;
use crate::domain::value_objects::VerificationStage;
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::services::token::{EmailTokenConfig, EmailTokenService};

use super::config::VerificationServiceConfig;
use super::issuer::CodeIssuer;
use super::traits::{CacheStoreTrait, EmailSenderTrait, SmsGatewayTrait};
use super::types::{
    EmailDispatch, ImageCodeResponse, RequestSmsCode, SmsCodeCheck, SmsCodeSent, SmsDelivery,
    CAPTCHA_CONTENT_TYPE,
};

const VERIFICATION_EMAIL_SUBJECT: &str = "美多商城邮箱验证";

/// Orchestrates captchas, SMS codes and email tokens for the HTTP layer
pub struct VerificationCoordinator<C, S, E>
where
    C: CacheStoreTrait + ?Sized,
    S: SmsGatewayTrait + ?Sized,
    E: EmailSenderTrait + ?Sized,
{
    issuer: CodeIssuer<C>,
    tokens: EmailTokenService,
    sms_gateway: Arc<S>,
    email_sender: Arc<E>,
}

impl<C, S, E> VerificationCoordinator<C, S, E>
where
    C: CacheStoreTrait + ?Sized,
    S: SmsGatewayTrait + ?Sized,
    E: EmailSenderTrait + ?Sized,
{
    pub fn new(
        store: Arc<C>,
        sms_gateway: Arc<S>,
        email_sender: Arc<E>,
        config: VerificationServiceConfig,
        token_config: EmailTokenConfig,
    ) -> Self {
        Self {
            issuer: CodeIssuer::new(store, config),
            tokens: EmailTokenService::new(token_config),
            sms_gateway,
            email_sender,
        }
    }

    pub fn issuer(&self) -> &CodeIssuer<C> {
        &self.issuer
    }

    pub fn tokens(&self) -> &EmailTokenService {
        &self.tokens
    }

    /// Render and store a captcha for a client-chosen challenge id
    pub async fn request_image_code(&self, challenge_id: &str) -> DomainResult<ImageCodeResponse> {
        let challenge_id = challenge_id.trim();
        if challenge_id.is_empty() {
            return Err(missing("challenge_id"));
        }

        let captcha = self.issuer.issue_image_code(challenge_id).await?;

        Ok(ImageCodeResponse {
            challenge_id: captcha.challenge_id,
            image: captcha.image,
            content_type: CAPTCHA_CONTENT_TYPE,
        })
    }

    /// Exchange a captcha answer for an SMS code.
    ///
    /// Steps run in order: mobile check, throttle pre-check, required
    /// parameters, captcha consumption, SMS issue, gateway delivery. The
    /// throttle pre-check spares a captcha while a code is still live; the
    /// set-if-absent inside the issue step is what actually decides.
    /// Gateway failures leave the code issued and are reported in
    /// [`SmsCodeSent::delivery`].
    pub async fn request_sms_code(&self, request: RequestSmsCode) -> DomainResult<SmsCodeSent> {
        let mobile = request.mobile.trim();
        if mobile.is_empty() {
            return Err(missing("mobile"));
        }
        let mobile = canonical_mobile(mobile).ok_or_else(|| VerificationError::InvalidParameter {
            field: "mobile".to_string(),
        })?;
        let mobile = mobile.as_str();

        if let Some(retry_after_secs) = self.issuer.sms_throttle_remaining(mobile).await? {
            tracing::warn!(
                phone = %mask_phone_number(mobile),
                retry_after_secs = retry_after_secs,
                event = "sms_code_throttled",
                "SMS code requested while a previous code is still live"
            );
            return Err(VerificationError::Throttled { retry_after_secs }.into());
        }

        let challenge_id = present(request.challenge_id.as_deref()).ok_or_else(|| missing("challenge_id"))?;
        let image_code = present(request.image_code.as_deref()).ok_or_else(|| missing("image_code"))?;

        self.issuer.validate_image_code(challenge_id, image_code).await?;

        let code = self.issuer.issue_sms_code(mobile).await?;

        let delivery = match self.sms_gateway.send_verification_code(mobile, &code.code).await {
            Ok(message_id) => {
                tracing::info!(
                    phone = %mask_phone_number(mobile),
                    message_id = %message_id,
                    event = "sms_code_sent",
                    "SMS code handed to gateway"
                );
                SmsDelivery::Sent { message_id }
            }
            Err(reason) => {
                tracing::error!(
                    phone = %mask_phone_number(mobile),
                    error = %reason,
                    event = "sms_code_delivery_failed",
                    "SMS gateway rejected the code"
                );
                SmsDelivery::Failed { reason }
            }
        };

        Ok(SmsCodeSent {
            expires_in_secs: self.issuer.config().sms_code_ttl_secs,
            delivery,
        })
    }

    /// Check an SMS code, consuming it on success
    pub async fn validate_sms_code(&self, mobile: &str, candidate: &str) -> DomainResult<SmsCodeCheck> {
        let mobile = mobile.trim();
        if mobile.is_empty() {
            return Err(missing("mobile"));
        }
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return Err(missing("sms_code"));
        }
        let mobile = canonical_mobile(mobile).unwrap_or_else(|| mobile.to_string());

        match self.issuer.validate_sms_code(&mobile, candidate).await {
            Ok(()) => Ok(SmsCodeCheck::Valid),
            Err(DomainError::Verification(VerificationError::Mismatch)) => Ok(SmsCodeCheck::Invalid),
            Err(DomainError::Verification(VerificationError::ExpiredOrMissing)) => {
                Ok(SmsCodeCheck::Expired)
            }
            Err(e) => Err(e),
        }
    }

    /// Sign a token binding `user_id` to `email`
    pub fn issue_email_token(&self, user_id: i64, email: &str) -> DomainResult<String> {
        Ok(self.tokens.issue(user_id, email)?)
    }

    /// Recover the subject of an email token
    pub fn verify_email_token(&self, token: &str) -> DomainResult<VerifiedEmail> {
        let verified = self.tokens.verify(token).map_err(|e| {
            tracing::info!(error_code = e.error_code(), event = "email_token_rejected", "Email token rejected");
            e
        })?;
        Ok(verified)
    }

    /// Send a verification link for `email` to that address
    pub async fn send_verification_email(&self, user_id: i64, email: &str) -> DomainResult<EmailDispatch> {
        let email = email.trim();
        if email.is_empty() {
            return Err(missing("email"));
        }
        if !is_valid_email(email) {
            return Err(VerificationError::InvalidParameter {
                field: "email".to_string(),
            }
            .into());
        }

        let token = self.issue_email_token(user_id, email)?;
        let verify_url = EmailTokenService::verify_url(&self.issuer.config().email_verify_url, &token);
        let body = verification_email_body(email, &verify_url);

        match self
            .email_sender
            .send_html(email, VERIFICATION_EMAIL_SUBJECT, &body)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    user_id = user_id,
                    email = %mask_email(email),
                    event = "verification_email_sent",
                    "Verification email sent"
                );
                Ok(EmailDispatch::Sent)
            }
            Err(reason) => {
                tracing::error!(
                    user_id = user_id,
                    email = %mask_email(email),
                    error = %reason,
                    event = "verification_email_failed",
                    "Verification email could not be sent"
                );
                Ok(EmailDispatch::Failed { reason })
            }
        }
    }

    /// Stage of a flow, inferred from live store entries
    pub async fn current_stage(
        &self,
        challenge_id: Option<&str>,
        mobile: Option<&str>,
    ) -> DomainResult<VerificationStage> {
        let mobile = mobile.map(|m| canonical_mobile(m.trim()).unwrap_or_else(|| m.trim().to_string()));
        self.issuer.current_stage(challenge_id, mobile.as_deref()).await
    }
}

fn missing(field: &str) -> DomainError {
    VerificationError::MissingParameter {
        field: field.to_string(),
    }
    .into()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn verification_email_body(email: &str, verify_url: &str) -> String {
    format!(
        "<p>尊敬的用户您好！</p>\
         <p>感谢您使用美多商城。</p>\
         <p>您的邮箱为：{email} 。请点击此链接激活您的邮箱：</p>\
         <p><a href=\"{url}\">{url}</a></p>",
        email = email,
        url = verify_url
    )
}
