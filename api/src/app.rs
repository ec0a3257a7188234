//! Application state and factory
//!
//! Wires the store, SMS gateway and email sender into a
//! [`VerificationCoordinator`] and builds the Actix-web application around it.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use mv_core::services::token::EmailTokenConfig;
use mv_core::services::verification::{
    CacheStoreTrait, EmailSenderTrait, SmsGatewayTrait, VerificationCoordinator,
    VerificationServiceConfig,
};
use mv_infra::cache::create_cache_store;
use mv_infra::email::create_email_sender;
use mv_infra::sms::create_sms_gateway;
use mv_infra::InfrastructureError;
use mv_shared::config::AppConfig;
use mv_shared::types::{CodeResponse, RetCode};

use crate::handlers::{json_error_handler, path_error_handler, query_error_handler};
use crate::routes;

/// Coordinator over injected trait objects
pub type Coordinator =
    VerificationCoordinator<dyn CacheStoreTrait, dyn SmsGatewayTrait, dyn EmailSenderTrait>;

/// Shared state handed to every handler
pub struct AppState {
    pub coordinator: Coordinator,
    /// Same store the coordinator uses, kept for health checks
    pub store: Arc<dyn CacheStoreTrait>,
    /// Backend name reported by `/health`
    pub store_backend: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CacheStoreTrait>,
        store_backend: impl Into<String>,
        sms_gateway: Arc<dyn SmsGatewayTrait>,
        email_sender: Arc<dyn EmailSenderTrait>,
        config: VerificationServiceConfig,
        token_config: EmailTokenConfig,
    ) -> Self {
        let coordinator = VerificationCoordinator::new(
            store.clone(),
            sms_gateway,
            email_sender,
            config,
            token_config,
        );
        Self {
            coordinator,
            store,
            store_backend: store_backend.into(),
        }
    }

    /// Build the state from configuration, connecting to the store
    pub async fn from_config(config: &AppConfig) -> Result<Self, InfrastructureError> {
        let store = create_cache_store(&config.cache).await?;
        let sms_gateway = create_sms_gateway(&config.sms, config.verification.sms_code_ttl_secs)?;
        let email_sender = create_email_sender(&config.email)?;

        Ok(Self::new(
            store,
            config.cache.backend.to_string(),
            sms_gateway,
            email_sender,
            VerificationServiceConfig::from(&config.verification),
            EmailTokenConfig::from(&config.verification),
        ))
    }
}

/// Create the application with all routes
pub fn create_app(
    state: web::Data<AppState>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(TracingLogger::default())
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(CodeResponse::new(RetCode::ParamErr, "资源不存在"))
}
