use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::dto::ImageCodePath;
use crate::handlers::ApiError;
use crate::i18n::Language;

use super::validate_request;

/// `GET /image_codes/{uuid}/`
///
/// Renders a fresh captcha for the client-chosen challenge id and returns
/// the PNG bytes. Requesting the same id again replaces the answer.
pub async fn get_image_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<ImageCodePath>,
) -> Result<HttpResponse, ApiError> {
    let lang = Language::from_request(&req);
    let path = path.into_inner();
    validate_request(&path, lang)?;

    let captcha = state
        .coordinator
        .request_image_code(&path.uuid)
        .await
        .map_err(|e| ApiError::new(e, lang))?;

    Ok(HttpResponse::Ok()
        .content_type(captcha.content_type)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(captcha.image))
}
