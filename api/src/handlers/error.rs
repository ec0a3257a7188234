//! Mapping domain errors onto HTTP responses
//!
//! Every error body is the `{code, errmsg}` envelope. `code` is the
//! business return code clients branch on; the HTTP status follows the
//! error class.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use mv_core::errors::{DomainError, TokenError, VerificationError};
use mv_shared::types::{CodeResponse, RetCode};

use crate::i18n::Language;

/// Domain error bound to the language of the request that caused it
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: DomainError,
    pub lang: Language,
}

impl ApiError {
    pub fn new(error: impl Into<DomainError>, lang: Language) -> Self {
        Self {
            error: error.into(),
            lang,
        }
    }

    /// Malformed request data
    pub fn invalid_request(lang: Language, message: impl Into<String>) -> Self {
        Self::new(
            DomainError::Validation {
                message: message.into(),
            },
            lang,
        )
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_code(&self.error)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error_code = self.error.error_code(),
                error = %self.error,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error_code = self.error.error_code(),
                error = %self.error,
                "Request rejected"
            );
        }

        let message = self.error.to_string();
        let body = CodeResponse::new(ret_code(&self.error), self.lang.localize(&message));

        let mut response = HttpResponse::build(status);
        if let DomainError::Verification(VerificationError::Throttled { retry_after_secs }) = &self.error {
            response.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
        }
        response.json(body)
    }
}

/// Business return code for a domain error
pub fn ret_code(error: &DomainError) -> RetCode {
    match error {
        DomainError::Verification(e) => match e {
            VerificationError::MissingParameter { .. } => RetCode::NecessaryParamErr,
            VerificationError::InvalidParameter { field } => match field.as_str() {
                "mobile" => RetCode::MobileErr,
                "email" => RetCode::EmailErr,
                _ => RetCode::ParamErr,
            },
            // SMS outcomes are reported as values, so these come from captchas
            VerificationError::ExpiredOrMissing | VerificationError::Mismatch => RetCode::ImageCodeErr,
            VerificationError::Throttled { .. } => RetCode::ThrottlingErr,
            VerificationError::DeliveryFailed { .. } => RetCode::ServerErr,
            VerificationError::StoreUnavailable { .. } => RetCode::DbErr,
        },
        DomainError::Token(TokenError::GenerationFailed) => RetCode::ServerErr,
        DomainError::Token(_) => RetCode::ParamErr,
        DomainError::Validation { .. } => RetCode::ParamErr,
        DomainError::Internal { .. } => RetCode::ServerErr,
    }
}

/// HTTP status for a domain error
pub fn status_code(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Verification(e) => match e {
            VerificationError::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            VerificationError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
            VerificationError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        },
        DomainError::Token(TokenError::GenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::BAD_REQUEST,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render JSON body extraction failures as the error envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let lang = Language::from_request(req);
    ApiError::invalid_request(lang, format!("Invalid JSON body: {} | 参数有误", err)).into()
}

/// Render query string extraction failures as the error envelope
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let lang = Language::from_request(req);
    ApiError::invalid_request(lang, format!("Invalid query string: {} | 参数有误", err)).into()
}

/// Render path segment extraction failures as the error envelope
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let lang = Language::from_request(req);
    ApiError::invalid_request(lang, format!("Invalid path: {} | 参数有误", err)).into()
}
