//! Business services containing the verification use cases.

pub mod captcha;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use captcha::{Captcha, CaptchaGenerator};
pub use token::{EmailTokenConfig, EmailTokenService};
pub use verification::{
    CacheStoreTrait, CodeIssuer, EmailDispatch, EmailSenderTrait, ImageCodeResponse,
    RequestSmsCode, SmsCodeCheck, SmsCodeSent, SmsDelivery, SmsGatewayTrait,
    VerificationCoordinator, VerificationServiceConfig,
};
