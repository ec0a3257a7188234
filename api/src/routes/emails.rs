use actix_web::{web, HttpRequest, HttpResponse};

use mv_core::errors::VerificationError;
use mv_core::services::verification::EmailDispatch;
use mv_shared::types::{CodeResponse, RetCode};

use crate::app::AppState;
use crate::dto::{EmailTokenQuery, SetEmailRequest};
use crate::handlers::ApiError;
use crate::i18n::Language;

use super::validate_request;

/// `PUT /emails/`
///
/// Sends a verification link for `{user_id, email}`. Nothing is stored, so
/// a failed delivery can be retried straight away.
pub async fn set_email(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SetEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let lang = Language::from_request(&req);
    let body = body.into_inner();
    validate_request(&body, lang)?;

    let dispatch = state
        .coordinator
        .send_verification_email(body.user_id, &body.email)
        .await
        .map_err(|e| ApiError::new(e, lang))?;

    Ok(match dispatch {
        EmailDispatch::Sent => HttpResponse::Ok().json(CodeResponse::new(
            RetCode::Ok,
            lang.pick("添加邮箱成功", "Verification email sent"),
        )),
        EmailDispatch::Failed { .. } => HttpResponse::BadGateway().json(CodeResponse::new(
            RetCode::EmailErr,
            lang.pick("发送验证邮件失败", "Failed to send verification email"),
        )),
    })
}

/// `GET /emails/verification/?token=`
///
/// Returns the `{user_id, email}` the token was issued for. Marking the
/// address as verified is up to the caller.
pub async fn verify_email(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<EmailTokenQuery>,
) -> Result<HttpResponse, ApiError> {
    let lang = Language::from_request(&req);

    let token = query
        .into_inner()
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            ApiError::new(
                VerificationError::MissingParameter {
                    field: "token".to_string(),
                },
                lang,
            )
        })?;

    let verified = state
        .coordinator
        .verify_email_token(token.trim())
        .map_err(|e| ApiError::new(e, lang))?;

    Ok(HttpResponse::Ok().json(CodeResponse::ok_with(
        lang.pick("邮箱验证成功", "Email verified"),
        verified,
    )))
}
