use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use mv_core::services::verification::{RequestSmsCode, SmsCodeCheck};

/// Client-chosen captcha challenge ids: word characters and dashes
static CHALLENGE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]+$").unwrap());

/// `GET /image_codes/{uuid}/`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImageCodePath {
    #[validate(length(min = 1, max = 64), regex = "CHALLENGE_ID")]
    pub uuid: String,
}

/// Query string of `GET /sms_codes/{mobile}/`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SmsCodeQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 16))]
    pub image_code: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 64), regex = "CHALLENGE_ID")]
    pub uuid: Option<String>,
}

/// `?uuid=` is a missing parameter, not a malformed one
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

impl SmsCodeQuery {
    pub fn into_request(self, mobile: String) -> RequestSmsCode {
        RequestSmsCode {
            mobile,
            challenge_id: self.uuid,
            image_code: self.image_code,
        }
    }
}

/// Body of `POST /sms_codes/verification/`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ValidateSmsCodeRequest {
    #[validate(length(max = 20))]
    pub mobile: String,
    #[validate(length(max = 16))]
    pub sms_code: String,
}

/// Result payload of an SMS code check
#[derive(Debug, Clone, Serialize)]
pub struct SmsCodeCheckResponse {
    pub result: SmsCodeCheck,
}

/// Body of `PUT /emails/`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetEmailRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(length(max = 254))]
    pub email: String,
}

/// Query string of `GET /emails/verification/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailTokenQuery {
    pub token: Option<String>,
}
