//! Inventory service: derived stock reporting and dispatch management.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{Destination, DispatchRecord, ProductStock};
use crate::services::stock::{self, FullStockReport};
use crate::store::JsonStore;

/// Payload for creating a dispatch record.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDispatch {
    pub date: String,
    #[validate(length(min = 1))]
    pub product_name: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
    pub destination: Destination,
    #[serde(default)]
    pub destination_detail: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Service for stock reports and dispatches.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<JsonStore>,
}

impl InventoryService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Stock positions for every product known to the system.
    pub async fn stock_report(&self) -> Vec<ProductStock> {
        let db = self.store.snapshot().await;
        stock::stock_report(&db.production_logs, &db.dispatch_logs, &db.products)
    }

    /// Stock positions plus the dispatch history, newest first.
    pub async fn full_stock_report(&self) -> FullStockReport {
        let db = self.store.snapshot().await;
        stock::full_stock_report(&db.production_logs, &db.dispatch_logs, &db.products)
    }

    /// Creates a dispatch after checking stock sufficiency.
    ///
    /// The check and the append run under one store mutation, so two
    /// dispatches in this process cannot both pass the check against the
    /// same stock.
    #[instrument(skip(self, new_dispatch), fields(product = %new_dispatch.product_name))]
    pub async fn create_dispatch(
        &self,
        new_dispatch: NewDispatch,
    ) -> Result<DispatchRecord, ServiceError> {
        let now = Utc::now();

        let outcome = self
            .store
            .mutate(|db| {
                let available = stock::current_stock_for(
                    &db.production_logs,
                    &db.dispatch_logs,
                    &new_dispatch.product_name,
                );
                if new_dispatch.quantity > available {
                    return Err(ServiceError::InsufficientStock(format!(
                        "Available: {available}, Requested: {}",
                        new_dispatch.quantity
                    )));
                }

                let record = DispatchRecord {
                    id: format!("DIS-{}", now.timestamp_millis()),
                    date: new_dispatch.date.clone(),
                    product_name: new_dispatch.product_name.clone(),
                    quantity: new_dispatch.quantity,
                    destination: new_dispatch.destination,
                    destination_detail: new_dispatch.destination_detail.clone(),
                    notes: new_dispatch.notes.clone(),
                    timestamp: now.to_rfc3339(),
                };
                db.dispatch_logs.push(record.clone());
                Ok(record)
            })
            .await?;

        let record = outcome?;
        info!(id = %record.id, quantity = record.quantity, "dispatch created");
        Ok(record)
    }

    /// Deletes a dispatch record by id.
    #[instrument(skip(self))]
    pub async fn delete_dispatch(&self, id: &str) -> Result<(), ServiceError> {
        let removed = self
            .store
            .mutate(|db| {
                let before = db.dispatch_logs.len();
                db.dispatch_logs.retain(|record| record.id != id);
                db.dispatch_logs.len() < before
            })
            .await?;

        if removed {
            info!(%id, "dispatch deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!(
                "Dispatch record {id} not found"
            )))
        }
    }
}
