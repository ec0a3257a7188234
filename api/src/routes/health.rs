use actix_web::{web, HttpResponse};
use chrono::Utc;

use mv_shared::types::{HealthResponse, HealthStatus};

use crate::app::AppState;

/// `GET /health`: pings the verification store
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = match state.store.ping().await {
        Ok(()) => HealthStatus::Healthy,
        Err(e) => {
            tracing::warn!(store = %state.store_backend, error = %e, "Health check failed");
            HealthStatus::Unhealthy
        }
    };

    let body = HealthResponse {
        status,
        store: state.store_backend.clone(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match status {
        HealthStatus::Healthy => HttpResponse::Ok().json(body),
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(body),
    }
}
