//! Production log service: CRUD over the stored log history plus batch id
//! allocation.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::ProductionLogEntry;
use crate::services::batch_id;
use crate::store::JsonStore;

/// Payload for appending a production log.
///
/// Carries the current field names; legacy rows only ever enter the system
/// through the existing data file, never through this API.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProductionLog {
    #[serde(default)]
    pub id: Option<String>,
    pub date: String,
    pub operator: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[validate(length(min = 1))]
    pub material_name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[validate(length(min = 1))]
    pub product_name: String,
    #[validate(range(min = 0))]
    pub units_produced: i64,
}

/// Service for the production log history.
#[derive(Clone)]
pub struct ProductionService {
    store: Arc<JsonStore>,
}

impl ProductionService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Full production log history in insertion order.
    pub async fn list_logs(&self) -> Vec<ProductionLogEntry> {
        self.store.snapshot().await.production_logs
    }

    /// Appends a production log, assigning an id and timestamp when absent.
    #[instrument(skip(self, new_log), fields(batch_id = ?new_log.batch_id))]
    pub async fn create_log(
        &self,
        new_log: NewProductionLog,
    ) -> Result<ProductionLogEntry, ServiceError> {
        let now = Utc::now();
        let entry = ProductionLogEntry {
            id: new_log
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("LOG-{}", now.timestamp_millis())),
            date: new_log.date,
            operator: new_log.operator,
            batch_id: new_log.batch_id,
            material_name: Some(new_log.material_name),
            quantity: Some(new_log.quantity),
            product_name: Some(new_log.product_name),
            units_produced: Some(new_log.units_produced),
            timestamp: Some(now.to_rfc3339()),
            ..Default::default()
        };

        let stored = self
            .store
            .mutate(|db| {
                db.production_logs.push(entry.clone());
                entry
            })
            .await?;

        info!(id = %stored.id, "production log created");
        Ok(stored)
    }

    /// Deletes a production log by id.
    #[instrument(skip(self))]
    pub async fn delete_log(&self, id: &str) -> Result<(), ServiceError> {
        let removed = self
            .store
            .mutate(|db| {
                let before = db.production_logs.len();
                db.production_logs.retain(|log| log.id != id);
                db.production_logs.len() < before
            })
            .await?;

        if removed {
            info!(%id, "production log deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!(
                "Production log {id} not found"
            )))
        }
    }

    /// Next sequential batch id for the current year.
    ///
    /// Re-reads the data file so external corruption is noticed; on any
    /// failure a timestamp-derived id is returned instead of an error, since
    /// batch creation must never be blocked.
    pub async fn next_batch_id(&self) -> String {
        match self.store.read_from_disk().await {
            Ok(db) => {
                let existing: Vec<String> = db
                    .production_logs
                    .iter()
                    .filter_map(|log| log.batch_id.clone())
                    .collect();
                batch_id::next_batch_id_now(&existing)
            }
            Err(err) => {
                warn!(error = %err, "batch id scan failed; using fallback id");
                batch_id::fallback_batch_id_now()
            }
        }
    }
}
