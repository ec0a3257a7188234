//! API response types and return codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Business return codes carried in every JSON body.
///
/// Clients branch on these rather than on HTTP status, so the numeric
/// values are part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetCode {
    Ok,
    ImageCodeErr,
    ThrottlingErr,
    NecessaryParamErr,
    MobileErr,
    SmsCodeErr,
    DbErr,
    EmailErr,
    ServerErr,
    ParamErr,
}

impl RetCode {
    /// Wire value of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            RetCode::Ok => "0",
            RetCode::ImageCodeErr => "4001",
            RetCode::ThrottlingErr => "4002",
            RetCode::NecessaryParamErr => "4003",
            RetCode::MobileErr => "4007",
            RetCode::SmsCodeErr => "4008",
            RetCode::DbErr => "5000",
            RetCode::EmailErr => "5001",
            RetCode::ServerErr => "5002",
            RetCode::ParamErr => "5006",
        }
    }
}

impl Serialize for RetCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for RetCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{code, errmsg}` envelope returned by the verification endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CodeResponse<T = ()> {
    pub code: RetCode,
    pub errmsg: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl CodeResponse<()> {
    /// Envelope without payload
    pub fn new(code: RetCode, errmsg: impl Into<String>) -> Self {
        Self {
            code,
            errmsg: errmsg.into(),
            data: None,
        }
    }
}

impl<T> CodeResponse<T> {
    /// Successful envelope with payload fields flattened next to `code`
    pub fn ok_with(errmsg: impl Into<String>, data: T) -> Self {
        Self {
            code: RetCode::Ok,
            errmsg: errmsg.into(),
            data: Some(data),
        }
    }

    /// Check if the response is successful
    pub fn is_ok(&self) -> bool {
        self.code == RetCode::Ok
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Store backend name
    pub store: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_response_serialization() {
        let body = serde_json::to_value(CodeResponse::new(RetCode::ThrottlingErr, "too frequent"))
            .unwrap();
        assert_eq!(body["code"], "4002");
        assert_eq!(body["errmsg"], "too frequent");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_code_response_flattens_payload() {
        #[derive(Serialize)]
        struct Payload {
            expires_in: u64,
        }

        let body =
            serde_json::to_value(CodeResponse::ok_with("ok", Payload { expires_in: 300 })).unwrap();
        assert_eq!(body["code"], "0");
        assert_eq!(body["expires_in"], 300);
    }
}
