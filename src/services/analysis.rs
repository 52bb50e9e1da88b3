//! Efficiency and anomaly analysis over correlated production records.

use chrono::Utc;

use crate::models::{
    BatchStatus, DailyReport, FinishedProductEntry, ProductStock, ProductionRecord,
    RawMaterialEntry,
};
use crate::services::correlation::{correlate, CRITICAL_EFFICIENCY};

/// Records this many standard deviations below mean efficiency are anomalies.
const ANOMALY_SIGMA: f64 = 1.5;
/// Mean efficiency below this raises the plant-wide alert.
const OVERALL_EFFICIENCY_FLOOR: f64 = 80.0;
/// Raw input above this combined with critical efficiency counts as waste.
const HIGH_USAGE_THRESHOLD: f64 = 100.0;
/// Analyzer-wide low-stock alert threshold.
///
/// Deliberately independent of each product's own `minStockLevel`; the two
/// can disagree and the discrepancy is preserved as observed in production.
const LOW_STOCK_ALERT_THRESHOLD: i64 = 50;

/// Builds the daily report: reconciled batches, aggregate metrics and the
/// alert list.
///
/// Anomaly detection runs only with two or more records; it uses population
/// mean and standard deviation of efficiency and reclassifies outliers to
/// `critical` in place. Alert ordering is anomalies, then the plant-wide
/// efficiency alert, then low-stock alerts, then recommendations.
pub fn daily_report(
    raw_materials: &[RawMaterialEntry],
    finished_products: &[FinishedProductEntry],
    inventory: &[ProductStock],
) -> DailyReport {
    let mut records = correlate(raw_materials, finished_products);

    let total_material_used: f64 = records.iter().map(|r| r.raw_material.quantity).sum();
    let total_produced: i64 = records.iter().map(|r| r.finished_product.quantity).sum();
    let average_efficiency = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.efficiency).sum::<f64>() / records.len() as f64
    };

    let mut alerts = Vec::new();
    let mut recommendations = Vec::new();

    flag_anomalies(&mut records, average_efficiency, &mut alerts);

    if average_efficiency < OVERALL_EFFICIENCY_FLOOR {
        alerts.push("Warning: Overall production efficiency is below 80%.".to_string());
        recommendations.push("Investigate raw material quality for recent batches.".to_string());
    }

    let high_waste_count = records
        .iter()
        .filter(|r| {
            r.raw_material.quantity > HIGH_USAGE_THRESHOLD && r.efficiency < CRITICAL_EFFICIENCY
        })
        .count();
    if high_waste_count > 0 {
        recommendations.push(format!(
            "Detected {high_waste_count} batches with high material usage but low yield. Check machine calibration."
        ));
    }

    for item in inventory {
        if item.current_stock < LOW_STOCK_ALERT_THRESHOLD {
            alerts.push(format!(
                "Low Stock: {} ({} units).",
                item.name, item.current_stock
            ));
        }
    }

    alerts.extend(recommendations);

    DailyReport {
        date: Utc::now().to_rfc3339(),
        total_material_used,
        total_produced,
        average_efficiency,
        records,
        alerts,
        inventory: inventory.to_vec(),
    }
}

/// Reclassifies statistical outliers to `critical` and emits one alert each.
fn flag_anomalies(records: &mut [ProductionRecord], mean: f64, alerts: &mut Vec<String>) {
    if records.len() < 2 {
        return;
    }

    let variance = records
        .iter()
        .map(|r| (r.efficiency - mean).powi(2))
        .sum::<f64>()
        / records.len() as f64;
    let std_dev = variance.sqrt();
    let cutoff = mean - ANOMALY_SIGMA * std_dev;

    for record in records.iter_mut() {
        if record.efficiency < cutoff {
            record.status = BatchStatus::Critical;
            alerts.push(format!(
                "Anomaly Detect: Batch {} efficiency is significantly low ({:.1}%).",
                record.batch_id.as_deref().unwrap_or("unknown"),
                record.efficiency
            ));
        }
    }
}
