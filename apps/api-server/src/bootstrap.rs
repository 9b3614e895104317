//! Server startup: database connectivity, migrations, HTTP server.
//!
//! Every failure surfaces as a [`StartupError`]; `main` reports it and exits
//! with status 1.

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use migration::{Migrator, MigratorTrait};
use quill_infra::database::{DatabaseConfig, DatabaseConnections};
use sea_orm::DbErr;
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::config::{AppConfig, StorageConfig};
use crate::handlers;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Database connection timeout after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("Database connection failed: {0}")]
    Database(DbErr),

    #[error("Migration failed: {0}")]
    Migration(DbErr),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl StartupError {
    /// Whether the failure points at an unreachable or misconfigured database.
    pub fn is_connection_related(&self) -> bool {
        match self {
            StartupError::Timeout(_) => true,
            StartupError::Database(DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => true,
            StartupError::Database(err) => {
                let msg = err.to_string().to_lowercase();
                ["connection", "refused", "database", "lookup", "resolve"]
                    .iter()
                    .any(|needle| msg.contains(needle))
            }
            StartupError::Migration(_) | StartupError::Io(_) => false,
        }
    }
}

/// Log the panic and terminate with status 1.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        tracing::error!(%location, "Uncaught panic: {}", payload);
        std::process::exit(1);
    }));
}

/// Connect, optionally migrate, then serve until shutdown.
pub async fn run(config: &AppConfig) -> Result<(), StartupError> {
    let state = match &config.storage {
        StorageConfig::Postgres(db) => {
            let connections = connect(db, config.connect_timeout).await?;

            if config.run_migrations {
                tracing::info!("Applying pending migrations...");
                Migrator::up(&connections.main, None)
                    .await
                    .map_err(StartupError::Migration)?;
            }

            AppState::postgres(connections)
        }
        StorageConfig::Memory => {
            tracing::warn!("DATABASE_URL=memory: data is kept in process memory only");
            AppState::in_memory()
        }
    };

    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?;

    let base = format!("http://{}:{}", public_host(&config.host), config.port);
    tracing::info!("Application is running on: {}", base);
    tracing::info!("OpenAPI documentation: {}/api", base);
    tracing::info!("Health check: {}/health", base);

    server.run().await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect(
    config: &DatabaseConfig,
    limit: Duration,
) -> Result<DatabaseConnections, StartupError> {
    match tokio::time::timeout(limit, DatabaseConnections::init(config)).await {
        Ok(result) => result.map_err(StartupError::Database),
        Err(_) => Err(StartupError::Timeout(limit)),
    }
}

fn public_host(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" => "localhost",
        other => other,
    }
}

/// Log a startup failure with database diagnostics where they apply.
pub fn report(err: &StartupError, config: &AppConfig) {
    tracing::error!("Failed to start application: {}", err);

    if !err.is_connection_related() {
        return;
    }

    if !matches!(err, StartupError::Timeout(_)) {
        tracing::error!("Database connection error detected. Please check the following:");
        tracing::error!("1. Is PostgreSQL running?");
        tracing::error!("2. Are the database credentials correct in the .env file?");
        tracing::error!("3. Is the database host and port accessible?");
        for line in connection_settings(config) {
            tracing::error!("   {}", line);
        }
    }

    tracing::error!("Quick fixes:");
    tracing::error!("   - Run: docker-compose up -d");
    tracing::error!("   - Or: make sure PostgreSQL is running locally");
    tracing::error!("   - Or: set DATABASE_URL=memory to run without PostgreSQL");
}

/// The connection settings in effect, password masked.
fn connection_settings(config: &AppConfig) -> Vec<String> {
    let settings = &config.database_settings;
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "not set".to_string());

    let mut lines = Vec::with_capacity(5);
    if let StorageConfig::Postgres(db) = &config.storage {
        lines.push(format!("DATABASE_URL: {}", db.redacted_url()));
    }
    lines.push(format!("DATABASE_HOST: {}", show(&settings.host)));
    lines.push(format!("DATABASE_PORT: {}", show(&settings.port)));
    lines.push(format!("DATABASE_NAME: {}", show(&settings.name)));
    lines.push(format!("DATABASE_USER: {}", show(&settings.user)));
    lines
}
