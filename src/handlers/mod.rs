//! HTTP handlers and router composition.

pub mod common;
pub mod health;
pub mod inventory;
pub mod master_data;
pub mod production;
pub mod reports;

use std::sync::Arc;

use axum::Router;

use crate::config::AppConfig;
use crate::services::{
    inventory::InventoryService, master_data::MasterDataService, production::ProductionService,
    reports::ReportService,
};
use crate::store::JsonStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<JsonStore>,
    pub production: ProductionService,
    pub inventory: InventoryService,
    pub reports: ReportService,
    pub master_data: MasterDataService,
}

impl AppState {
    /// Builds the state and its service layer over one store handle.
    pub fn new(config: AppConfig, store: Arc<JsonStore>) -> Self {
        Self {
            config,
            production: ProductionService::new(store.clone()),
            inventory: InventoryService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            master_data: MasterDataService::new(store.clone()),
            store,
        }
    }
}

/// The versioned API surface, to be nested under `/api/v1`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/production", production::router())
        .nest("/inventory", inventory::router())
        .nest("/reports", reports::router())
        .nest("/master", master_data::router())
}
