//! Sequential batch id allocation.
//!
//! Ids take the form `B-<year>-NNNN`, unique within a year and monotonically
//! increasing. Deleted batches never free their number: the allocator always
//! takes max+1 over the ids that currently exist.

use chrono::Utc;

/// Returns the next batch id for `year` given every currently existing id.
///
/// Only ids with the `B-<year>-` prefix and a parsable 3-part shape count;
/// ids from other years and malformed suffixes are skipped, never an error.
pub fn next_batch_id(existing_ids: &[String], year: i32) -> String {
    let prefix = format!("B-{year}-");

    let max_seq = existing_ids
        .iter()
        .filter(|id| id.starts_with(&prefix))
        .filter_map(|id| {
            let parts: Vec<&str> = id.split('-').collect();
            if parts.len() == 3 {
                parts[2].parse::<u32>().ok()
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0);

    format!("{prefix}{:04}", max_seq + 1)
}

/// Synthetic id used when the existing-id list is unavailable.
///
/// Batch creation sits on the critical path of a manual workflow, so the
/// allocator degrades to a timestamp-derived suffix instead of failing.
pub fn fallback_batch_id(year: i32) -> String {
    let suffix = Utc::now().timestamp_millis().rem_euclid(10_000);
    format!("B-{year}-{suffix:04}")
}

/// Next id for the current calendar year.
pub fn next_batch_id_now(existing_ids: &[String]) -> String {
    next_batch_id(existing_ids, current_year())
}

/// Fallback id for the current calendar year.
pub fn fallback_batch_id_now() -> String {
    fallback_batch_id(current_year())
}

fn current_year() -> i32 {
    use chrono::Datelike;
    Utc::now().year()
}
