//! Inventory endpoints: derived stock reporting and dispatch management.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::{deleted_response, success_response, validate_input};
use super::AppState;
use crate::errors::ServiceError;
use crate::services::inventory::NewDispatch;

/// Report mode selector.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StockReportParams {
    /// `full` adds the dispatch history, newest first.
    pub format: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_stock_report))
        .route("/dispatch", post(create_dispatch))
        .route("/dispatch/:id", delete(delete_dispatch))
}

/// Current stock positions, recomputed from the full history.
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(StockReportParams),
    responses(
        (status = 200, description = "Stock report; with format=full also the dispatch history")
    ),
    tag = "inventory"
)]
pub async fn get_stock_report(
    State(state): State<AppState>,
    Query(params): Query<StockReportParams>,
) -> impl IntoResponse {
    if params.format.as_deref() == Some("full") {
        success_response(state.inventory.full_stock_report().await)
    } else {
        success_response(state.inventory.stock_report().await)
    }
}

/// Dispatch finished stock to a customer or plating vendor.
#[utoipa::path(
    post,
    path = "/api/v1/inventory/dispatch",
    request_body = NewDispatch,
    responses(
        (status = 200, description = "Dispatch recorded", body = crate::models::DispatchRecord),
        (status = 400, description = "Invalid payload or insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn create_dispatch(
    State(state): State<AppState>,
    Json(payload): Json<NewDispatch>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let record = state.inventory.create_dispatch(payload).await?;
    Ok(success_response(record))
}

/// Delete a dispatch record; its quantity returns to stock.
#[utoipa::path(
    delete,
    path = "/api/v1/inventory/dispatch/{id}",
    params(("id" = String, Path, description = "Dispatch record id")),
    responses(
        (status = 200, description = "Dispatch deleted"),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn delete_dispatch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.inventory.delete_dispatch(&id).await?;
    Ok(deleted_response())
}
