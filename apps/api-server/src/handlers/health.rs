//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `up`, or `memory` when no database is configured.
    pub database: &'static str,
    pub timestamp: String,
}

/// Health check - returns server and database status.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = quill_shared::ErrorResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let database = match &state.db {
        Some(db) => {
            db.ping().await.map_err(|e| {
                tracing::warn!(error = %e, "Database ping failed");
                AppError::ServiceUnavailable("Database unreachable".to_string())
            })?;
            "up"
        }
        None => "memory",
    };

    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    Ok(HttpResponse::Ok().json(response))
}
