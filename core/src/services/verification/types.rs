//! Request and result types for the verification coordinator

use serde::{Deserialize, Serialize};

/// MIME type of rendered captchas
pub const CAPTCHA_CONTENT_TYPE: &str = "image/png";

/// Rendered captcha handed back to the client. The answer is not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCodeResponse {
    pub challenge_id: String,
    pub image: Vec<u8>,
    pub content_type: &'static str,
}

/// Request for an SMS code, gated by a captcha answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestSmsCode {
    pub mobile: String,
    pub challenge_id: Option<String>,
    pub image_code: Option<String>,
}

/// What happened when the code was handed to the SMS gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SmsDelivery {
    Sent { message_id: String },
    Failed { reason: String },
}

/// Result of a successful SMS code request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsCodeSent {
    /// Seconds the code stays valid, which is also the wait before a new one
    pub expires_in_secs: u64,
    pub delivery: SmsDelivery,
}

/// Outcome of checking an SMS code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsCodeCheck {
    /// Code matched and has been consumed
    Valid,
    /// Code did not match; the stored code stays live
    Invalid,
    /// No live code for the mobile
    Expired,
}

/// Result of sending a verification email. The link itself only travels
/// inside the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmailDispatch {
    Sent,
    Failed { reason: String },
}
