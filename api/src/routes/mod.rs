//! Route handlers
//!
//! URLs keep their trailing slashes; clients call them exactly as listed.

pub mod emails;
pub mod health;
pub mod image_codes;
pub mod sms_codes;

use actix_web::web;
use validator::Validate;

use crate::handlers::ApiError;
use crate::i18n::Language;

/// Register every verification route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/image_codes/{uuid}/", web::get().to(image_codes::get_image_code))
        .route("/sms_codes/verification/", web::post().to(sms_codes::verify_sms_code))
        .route("/sms_codes/{mobile}/", web::get().to(sms_codes::send_sms_code))
        .route("/emails/", web::put().to(emails::set_email))
        .route("/emails/verification/", web::get().to(emails::verify_email));
}

fn validate_request<T: Validate>(value: &T, lang: Language) -> Result<(), ApiError> {
    value
        .validate()
        .map_err(|e| ApiError::invalid_request(lang, format!("{} | 参数有误", e)))
}
