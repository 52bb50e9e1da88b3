//! Liveness endpoint.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;

/// Liveness payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Report service liveness.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthStatus)),
    tag = "health"
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
