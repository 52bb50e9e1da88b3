//! Batch correlator: joins raw-material consumption to finished output.

use crate::models::{
    BatchStatus, FinishedProductEntry, MaterialUsage, ProductOutput, ProductionRecord,
    RawMaterialEntry,
};

/// Batches below this efficiency are classified `critical`.
pub const CRITICAL_EFFICIENCY: f64 = 75.0;
/// Batches below this (and at or above critical) are classified `warning`.
pub const WARNING_EFFICIENCY: f64 = 85.0;

/// Classifies a yield percentage against the fixed threshold table.
pub fn classify_efficiency(efficiency: f64) -> BatchStatus {
    if efficiency < CRITICAL_EFFICIENCY {
        BatchStatus::Critical
    } else if efficiency < WARNING_EFFICIENCY {
        BatchStatus::Warning
    } else {
        BatchStatus::Optimal
    }
}

/// Joins consumption entries to output entries by batch id.
///
/// Each raw entry pairs with the first finished entry (input order) carrying
/// an equal batch id; entries without a batch id never match, and finished
/// entries are not consumed by a match. Unmatched raw entries are excluded.
/// A raw quantity of zero yields efficiency 0 and `critical` status instead
/// of dividing by zero.
pub fn correlate(
    raw_materials: &[RawMaterialEntry],
    finished_products: &[FinishedProductEntry],
) -> Vec<ProductionRecord> {
    let mut records = Vec::new();

    for rm in raw_materials {
        let Some(batch_id) = rm.batch_id.as_deref() else {
            continue;
        };
        let Some(fp) = finished_products
            .iter()
            .find(|fp| fp.batch_id.as_deref() == Some(batch_id))
        else {
            continue;
        };

        let (efficiency, status) = if rm.quantity_used > 0.0 {
            let efficiency = (fp.quantity_produced as f64 / rm.quantity_used) * 100.0;
            (efficiency, classify_efficiency(efficiency))
        } else {
            (0.0, BatchStatus::Critical)
        };

        records.push(ProductionRecord {
            id: format!("{}-{}", rm.id, fp.id),
            date: rm.date.clone(),
            batch_id: rm.batch_id.clone(),
            raw_material: MaterialUsage {
                name: rm.material_name.clone(),
                quantity: rm.quantity_used,
            },
            finished_product: ProductOutput {
                name: fp.product_name.clone(),
                quantity: fp.quantity_produced,
            },
            efficiency,
            status,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw(id: &str, batch: Option<&str>, quantity: f64) -> RawMaterialEntry {
        RawMaterialEntry {
            id: id.into(),
            date: "2024-05-01".into(),
            operator_name: "Asha".into(),
            material_name: "Brass Rod".into(),
            quantity_used: quantity,
            batch_id: batch.map(Into::into),
            timestamp: "2024-05-01T09:00:00Z".into(),
        }
    }

    fn finished(id: &str, batch: Option<&str>, quantity: i64) -> FinishedProductEntry {
        FinishedProductEntry {
            id: id.into(),
            date: "2024-05-01".into(),
            operator_name: "Asha".into(),
            product_name: "Hinge".into(),
            quantity_produced: quantity,
            batch_id: batch.map(Into::into),
            timestamp: "2024-05-01T10:00:00Z".into(),
        }
    }

    #[rstest]
    #[case(100.0, 90, 90.0, BatchStatus::Optimal)]
    #[case(100.0, 80, 80.0, BatchStatus::Warning)]
    #[case(100.0, 70, 70.0, BatchStatus::Critical)]
    fn efficiency_and_status_follow_the_threshold_table(
        #[case] used: f64,
        #[case] produced: i64,
        #[case] expected_efficiency: f64,
        #[case] expected_status: BatchStatus,
    ) {
        let records = correlate(
            &[raw("RM-1", Some("B-2024-0001"), used)],
            &[finished("FP-1", Some("B-2024-0001"), produced)],
        );
        assert_eq!(records.len(), 1);
        assert!((records[0].efficiency - expected_efficiency).abs() < f64::EPSILON);
        assert_eq!(records[0].status, expected_status);
    }

    #[test]
    fn zero_raw_quantity_is_critical_not_a_panic() {
        let records = correlate(
            &[raw("RM-1", Some("B-2024-0001"), 0.0)],
            &[finished("FP-1", Some("B-2024-0001"), 50)],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].efficiency, 0.0);
        assert_eq!(records[0].status, BatchStatus::Critical);
    }

    #[test]
    fn unmatched_raw_entries_are_excluded() {
        let records = correlate(
            &[
                raw("RM-1", Some("B-2024-0001"), 100.0),
                raw("RM-2", Some("B-2024-0002"), 100.0),
            ],
            &[finished("FP-1", Some("B-2024-0001"), 90)],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].batch_id.as_deref(), Some("B-2024-0001"));
    }

    #[test]
    fn entries_without_batch_ids_never_pair() {
        let records = correlate(&[raw("RM-1", None, 100.0)], &[finished("FP-1", None, 90)]);
        assert!(records.is_empty());
    }

    #[test]
    fn duplicate_batch_ids_use_first_match_in_input_order() {
        let records = correlate(
            &[raw("RM-1", Some("B-2024-0001"), 100.0)],
            &[
                finished("FP-1", Some("B-2024-0001"), 90),
                finished("FP-2", Some("B-2024-0001"), 10),
            ],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "RM-1-FP-1");
        assert_eq!(records[0].finished_product.quantity, 90);
    }

    #[test]
    fn record_carries_both_sides_and_a_composite_id() {
        let records = correlate(
            &[raw("RM-1", Some("B-2024-0001"), 120.0)],
            &[finished("FP-1", Some("B-2024-0001"), 108)],
        );
        let record = &records[0];
        assert_eq!(record.id, "RM-1-FP-1");
        assert_eq!(record.raw_material.name, "Brass Rod");
        assert_eq!(record.raw_material.quantity, 120.0);
        assert_eq!(record.finished_product.name, "Hinge");
        assert_eq!(record.finished_product.quantity, 108);
    }
}
