//! Boundary normalization of stored production logs.
//!
//! The reporting core never branches on legacy field shapes; it receives the
//! canonical [`RawMaterialEntry`] / [`FinishedProductEntry`] pair produced
//! here. Fallback chains, oldest name wins first because that is what the
//! data file actually contains:
//!
//! - material name: `rmUsed` then `materialName`
//! - material quantity: `rmQuantity` then `quantity`
//! - product name: `componentProduced` then `productName`
//! - produced quantity: `quantityProduced` then `unitsProduced` then 0
//!
//! A row whose material side cannot be resolved yields no raw entry at all, so
//! one malformed row never aborts a report; it just stops contributing.

use super::{FinishedProductEntry, ProductionLogEntry, RawMaterialEntry};

/// Resolved product-output side of a log row, used by the stock aggregator.
pub fn produced_output(log: &ProductionLogEntry) -> Option<(&str, i64)> {
    let name = log
        .component_produced
        .as_deref()
        .or(log.product_name.as_deref())
        .filter(|n| !n.is_empty())?;
    let quantity = log.quantity_produced.or(log.units_produced).unwrap_or(0);
    Some((name, quantity))
}

/// Resolved material-consumption side of a log row.
pub fn material_usage(log: &ProductionLogEntry) -> Option<(&str, f64)> {
    let name = log
        .rm_used
        .as_deref()
        .or(log.material_name.as_deref())
        .filter(|n| !n.is_empty())?;
    let quantity = log.rm_quantity.or(log.quantity)?;
    Some((name, quantity))
}

fn entry_suffix(log: &ProductionLogEntry) -> &str {
    if !log.id.is_empty() {
        &log.id
    } else {
        log.batch_id.as_deref().unwrap_or("")
    }
}

fn timestamp_or_date(log: &ProductionLogEntry) -> String {
    log.timestamp.clone().unwrap_or_else(|| log.date.clone())
}

/// Canonical raw-material entry for a stored log row, when resolvable.
pub fn raw_material_entry(log: &ProductionLogEntry) -> Option<RawMaterialEntry> {
    let (name, quantity) = material_usage(log)?;
    Some(RawMaterialEntry {
        id: format!("RM-{}", entry_suffix(log)),
        date: log.date.clone(),
        operator_name: log.operator.clone(),
        material_name: name.to_string(),
        quantity_used: quantity,
        batch_id: log.batch_id.clone(),
        timestamp: timestamp_or_date(log),
    })
}

/// Canonical finished-product entry for a stored log row, when resolvable.
pub fn finished_product_entry(log: &ProductionLogEntry) -> Option<FinishedProductEntry> {
    let (name, quantity) = produced_output(log)?;
    Some(FinishedProductEntry {
        id: format!("FP-{}", entry_suffix(log)),
        date: log.date.clone(),
        operator_name: log.operator.clone(),
        product_name: name.to_string(),
        quantity_produced: quantity,
        batch_id: log.batch_id.clone(),
        timestamp: timestamp_or_date(log),
    })
}

/// Splits a full log history into the canonical entry pair lists.
pub fn split_entries(
    logs: &[ProductionLogEntry],
) -> (Vec<RawMaterialEntry>, Vec<FinishedProductEntry>) {
    let raw = logs.iter().filter_map(raw_material_entry).collect();
    let finished = logs.iter().filter_map(finished_product_entry).collect();
    (raw, finished)
}
