use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use mv_api::telemetry::init_tracing;
use mv_api::{create_app, AppState};
use mv_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;
    config.validate().context("Invalid configuration")?;

    info!(
        environment = %config.environment,
        store = %config.cache.backend,
        sms_provider = %config.sms.provider,
        email_provider = %config.email.provider,
        "Starting mall verification service"
    );

    let state = web::Data::new(
        AppState::from_config(&config)
            .await
            .context("Failed to initialize verification services")?,
    );

    let bind_address = config.server.bind_address();
    let max_payload_size = config.server.max_payload_size;
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
