//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

mod bootstrap;
mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());
    bootstrap::install_panic_hook();

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    if let Err(err) = bootstrap::run(&config).await {
        bootstrap::report(&err, &config);
        std::process::exit(1);
    }
}
