//! Production log endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::common::{created_response, deleted_response, validate_input};
use super::AppState;
use crate::errors::ServiceError;
use crate::models::ProductionLogEntry;
use crate::services::production::NewProductionLog;

/// Allocator response for the next batch id.
#[derive(Debug, Serialize, ToSchema)]
pub struct NextBatchId {
    pub id: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_production_logs).post(create_production_log))
        .route("/batch-id", get(next_batch_id))
        .route("/:id", axum::routing::delete(delete_production_log))
}

/// List the full production log history.
#[utoipa::path(
    get,
    path = "/api/v1/production",
    responses(
        (status = 200, description = "Production log history", body = [ProductionLogEntry])
    ),
    tag = "production"
)]
pub async fn list_production_logs(State(state): State<AppState>) -> Json<Vec<ProductionLogEntry>> {
    Json(state.production.list_logs().await)
}

/// Append a production log entry.
#[utoipa::path(
    post,
    path = "/api/v1/production",
    request_body = NewProductionLog,
    responses(
        (status = 201, description = "Production log created", body = ProductionLogEntry),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn create_production_log(
    State(state): State<AppState>,
    Json(payload): Json<NewProductionLog>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let stored = state.production.create_log(payload).await?;
    Ok(created_response(stored))
}

/// Delete a production log by id.
///
/// Downstream stock figures shift immediately: stock is always a fold over
/// the remaining history.
#[utoipa::path(
    delete,
    path = "/api/v1/production/{id}",
    params(("id" = String, Path, description = "Production log id")),
    responses(
        (status = 200, description = "Production log deleted"),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn delete_production_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.production.delete_log(&id).await?;
    Ok(deleted_response())
}

/// Next sequential batch id for the current year.
///
/// Never fails: on store trouble a timestamp-derived id is returned, since
/// batch creation is on the critical path of a manual workflow.
#[utoipa::path(
    get,
    path = "/api/v1/production/batch-id",
    responses(
        (status = 200, description = "Next batch id", body = NextBatchId)
    ),
    tag = "production"
)]
pub async fn next_batch_id(State(state): State<AppState>) -> Json<NextBatchId> {
    Json(NextBatchId {
        id: state.production.next_batch_id().await,
    })
}
