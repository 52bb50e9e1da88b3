//! Stock aggregator: folds the full production and dispatch history into
//! per-product stock positions.

use std::collections::HashMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    normalize, DispatchRecord, Product, ProductStock, ProductType, ProductionLogEntry,
    DEFAULT_MIN_STOCK_LEVEL,
};

/// Stock report plus the dispatch history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FullStockReport {
    pub stock: Vec<ProductStock>,
    pub history: Vec<DispatchRecord>,
}

/// Per-product quantity totals in first-seen order.
struct Totals {
    sums: HashMap<String, i64>,
    order: Vec<String>,
}

impl Totals {
    fn new() -> Self {
        Self {
            sums: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn add(&mut self, name: &str, quantity: i64) {
        match self.sums.get_mut(name) {
            Some(sum) => *sum += quantity,
            None => {
                self.sums.insert(name.to_string(), quantity);
                self.order.push(name.to_string());
            }
        }
    }

    fn get(&self, name: &str) -> i64 {
        self.sums.get(name).copied().unwrap_or(0)
    }
}

fn produced_totals(logs: &[ProductionLogEntry]) -> Totals {
    let mut totals = Totals::new();
    for log in logs {
        if let Some((name, quantity)) = normalize::produced_output(log) {
            totals.add(name, quantity);
        }
    }
    totals
}

fn dispatched_totals(dispatches: &[DispatchRecord]) -> Totals {
    let mut totals = Totals::new();
    for dispatch in dispatches {
        totals.add(&dispatch.product_name, dispatch.quantity);
    }
    totals
}

/// Computes one [`ProductStock`] per product known to the system.
///
/// Master-data products come first, in master-data order; products that only
/// appear in production logs are appended afterwards in first-seen order with
/// defaulted threshold and type. `current_stock` is not clamped: a negative
/// value is a data-entry inconsistency that must stay visible.
pub fn stock_report(
    production_logs: &[ProductionLogEntry],
    dispatch_logs: &[DispatchRecord],
    products: &[Product],
) -> Vec<ProductStock> {
    let produced = produced_totals(production_logs);
    let dispatched = dispatched_totals(dispatch_logs);

    let mut report: Vec<ProductStock> = products
        .iter()
        .map(|product| {
            let total_produced = produced.get(&product.name);
            let total_dispatched = dispatched.get(&product.name);
            ProductStock {
                name: product.name.clone(),
                total_produced,
                total_dispatched,
                current_stock: total_produced - total_dispatched,
                min_stock_level: product.min_stock_level_or_default(),
                product_type: product.product_type_or_default(),
            }
        })
        .collect();

    // Legacy rows: produced but never registered in master data.
    for name in &produced.order {
        if products.iter().any(|p| &p.name == name) {
            continue;
        }
        let total_produced = produced.get(name);
        let total_dispatched = dispatched.get(name);
        report.push(ProductStock {
            name: name.clone(),
            total_produced,
            total_dispatched,
            current_stock: total_produced - total_dispatched,
            min_stock_level: DEFAULT_MIN_STOCK_LEVEL,
            product_type: ProductType::Finished,
        });
    }

    report
}

/// Current stock for a single product, by exact name match.
pub fn current_stock_for(
    production_logs: &[ProductionLogEntry],
    dispatch_logs: &[DispatchRecord],
    product_name: &str,
) -> i64 {
    let produced: i64 = production_logs
        .iter()
        .filter_map(normalize::produced_output)
        .filter(|(name, _)| *name == product_name)
        .map(|(_, quantity)| quantity)
        .sum();
    let dispatched: i64 = dispatch_logs
        .iter()
        .filter(|d| d.product_name == product_name)
        .map(|d| d.quantity)
        .sum();
    produced - dispatched
}

/// Dispatch history sorted by timestamp, most recent first.
///
/// Timestamps that fail to parse sort after every parsable one; ties keep
/// input order (stable sort), so the result is deterministic.
pub fn dispatch_history(dispatch_logs: &[DispatchRecord]) -> Vec<DispatchRecord> {
    let mut history: Vec<DispatchRecord> = dispatch_logs.to_vec();
    history.sort_by_key(|d| {
        std::cmp::Reverse(
            DateTime::parse_from_rfc3339(&d.timestamp)
                .map(|ts| ts.timestamp_millis())
                .unwrap_or(i64::MIN),
        )
    });
    history
}

/// Stock report plus the full dispatch history.
pub fn full_stock_report(
    production_logs: &[ProductionLogEntry],
    dispatch_logs: &[DispatchRecord],
    products: &[Product],
) -> FullStockReport {
    FullStockReport {
        stock: stock_report(production_logs, dispatch_logs, products),
        history: dispatch_history(dispatch_logs),
    }
}
