//! Report service: assembles the daily production report from a store
//! snapshot.

use std::sync::Arc;

use tracing::instrument;

use crate::models::{normalize, DailyReport, ProductionRecord};
use crate::services::{analysis, correlation, stock};
use crate::store::JsonStore;

/// Service producing derived reports; holds no state beyond the store handle.
#[derive(Clone)]
pub struct ReportService {
    store: Arc<JsonStore>,
}

impl ReportService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Daily report: correlated batches, efficiency metrics, alerts and the
    /// current stock positions. Recomputed from the full history on every
    /// call.
    #[instrument(skip(self))]
    pub async fn daily_report(&self) -> DailyReport {
        let db = self.store.snapshot().await;
        let (raw_materials, finished_products) = normalize::split_entries(&db.production_logs);
        let inventory = stock::stock_report(&db.production_logs, &db.dispatch_logs, &db.products);
        analysis::daily_report(&raw_materials, &finished_products, &inventory)
    }

    /// Correlated production records only, without the analysis pass.
    pub async fn production_records(&self) -> Vec<ProductionRecord> {
        let db = self.store.snapshot().await;
        let (raw_materials, finished_products) = normalize::split_entries(&db.production_logs);
        correlation::correlate(&raw_materials, &finished_products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductionLogEntry;

    fn legacy_log(batch: &str, used: f64, produced: i64) -> ProductionLogEntry {
        ProductionLogEntry {
            id: format!("LOG-{batch}"),
            date: "2024-05-01".into(),
            operator: "Asha".into(),
            batch_id: Some(batch.into()),
            rm_used: Some("Brass Rod".into()),
            rm_quantity: Some(used),
            component_produced: Some("Hinge".into()),
            quantity_produced: Some(produced),
            timestamp: Some("2024-05-01T09:00:00Z".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn daily_report_spans_legacy_rows_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(
            JsonStore::open(dir.path().join("db.json"), None)
                .await
                .unwrap(),
        );
        store
            .mutate(|db| {
                db.production_logs.push(legacy_log("B-2024-0001", 100.0, 90));
                db.production_logs.push(legacy_log("B-2024-0002", 100.0, 82));
            })
            .await
            .unwrap();

        let service = ReportService::new(store);
        let report = service.daily_report().await;

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.total_material_used, 200.0);
        assert_eq!(report.total_produced, 172);
        assert!((report.average_efficiency - 86.0).abs() < 1e-9);
        // 172 produced, nothing dispatched, but threshold is 50: no alert.
        assert!(report.alerts.is_empty());
        assert_eq!(report.inventory.len(), 1);
        assert_eq!(report.inventory[0].current_stock, 172);
    }
}
