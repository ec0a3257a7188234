//! Verification code workflow
//!
//! This module provides:
//! - Image code (captcha) issue and one-shot validation
//! - SMS code issue with reissue throttling and one-time consumption
//! - Email verification tokens and the verification email
//! - The store, SMS gateway and email sender traits it runs against

mod config;
mod coordinator;
mod issuer;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use coordinator::VerificationCoordinator;
pub use issuer::CodeIssuer;
pub use traits::{CacheStoreTrait, EmailSenderTrait, SmsGatewayTrait};
pub use types::{
    EmailDispatch, ImageCodeResponse, RequestSmsCode, SmsCodeCheck, SmsCodeSent, SmsDelivery,
    CAPTCHA_CONTENT_TYPE,
};
