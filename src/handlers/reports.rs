//! Reporting endpoints.

use axum::{extract::State, routing::get, Json, Router};

use super::AppState;
use crate::models::{DailyReport, ProductionRecord};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(get_daily_report))
        .route("/production", get(get_production_records))
}

/// The daily report: reconciled batches, efficiency metrics and alerts.
#[utoipa::path(
    get,
    path = "/api/v1/reports/daily",
    responses(
        (status = 200, description = "Daily production report", body = DailyReport)
    ),
    tag = "reports"
)]
pub async fn get_daily_report(State(state): State<AppState>) -> Json<DailyReport> {
    Json(state.reports.daily_report().await)
}

/// Correlated production records without the analysis pass.
#[utoipa::path(
    get,
    path = "/api/v1/reports/production",
    responses(
        (status = 200, description = "Correlated production records", body = [ProductionRecord])
    ),
    tag = "reports"
)]
pub async fn get_production_records(State(state): State<AppState>) -> Json<Vec<ProductionRecord>> {
    Json(state.reports.production_records().await)
}
