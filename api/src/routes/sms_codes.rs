use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

use mv_core::services::verification::SmsCodeCheck;
use mv_shared::types::{CodeResponse, RetCode};

use crate::app::AppState;
use crate::dto::{SmsCodeCheckResponse, SmsCodeQuery, ValidateSmsCodeRequest};
use crate::handlers::ApiError;
use crate::i18n::Language;

use super::validate_request;

/// `GET /sms_codes/{mobile}/?image_code=&uuid=`
///
/// Spends the captcha answer and issues an SMS code. A code that was
/// stored but could not be handed to the gateway still answers `0`, with
/// `delivery.status` set to `failed`; the mobile stays throttled until the
/// code expires.
pub async fn send_sms_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    mobile: web::Path<String>,
    query: web::Query<SmsCodeQuery>,
) -> Result<HttpResponse, ApiError> {
    let lang = Language::from_request(&req);
    let query = query.into_inner();
    validate_request(&query, lang)?;

    let sent = state
        .coordinator
        .request_sms_code(query.into_request(mobile.into_inner()))
        .await
        .map_err(|e| ApiError::new(e, lang))?;

    Ok(HttpResponse::Ok().json(CodeResponse::ok_with(
        lang.pick("发送短信成功", "SMS code sent"),
        sent,
    )))
}

/// `POST /sms_codes/verification/`
///
/// Checks `{mobile, sms_code}`. A matching code is consumed; a wrong code
/// leaves it in place.
pub async fn verify_sms_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ValidateSmsCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let lang = Language::from_request(&req);
    let body = body.into_inner();
    validate_request(&body, lang)?;

    let result = state
        .coordinator
        .validate_sms_code(&body.mobile, &body.sms_code)
        .await
        .map_err(|e| ApiError::new(e, lang))?;

    let (status, code, errmsg) = match result {
        SmsCodeCheck::Valid => (StatusCode::OK, RetCode::Ok, lang.pick("验证成功", "SMS code verified")),
        SmsCodeCheck::Invalid => (
            StatusCode::BAD_REQUEST,
            RetCode::SmsCodeErr,
            lang.pick("输入短信验证码有误", "SMS code does not match"),
        ),
        SmsCodeCheck::Expired => (
            StatusCode::BAD_REQUEST,
            RetCode::SmsCodeErr,
            lang.pick("短信验证码已失效", "SMS code expired or not found"),
        ),
    };

    Ok(HttpResponse::build(status).json(CodeResponse {
        code,
        errmsg: errmsg.to_string(),
        data: Some(SmsCodeCheckResponse { result }),
    }))
}
