//! # Forum API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Forum API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::init(&config.database).await?;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    });

    if config.reload {
        tracing::info!("Reload mode enabled: single worker, no shutdown grace period");
        server = server.workers(1).shutdown_timeout(0);
    }

    server
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
