//! Narrowing a dataset to an inclusive date window.

use chrono::NaiveDate;
use core_types::Transaction;

/// Keeps rows with `start <= purchase_date <= end`, inclusive on both ends.
///
/// Filtering only happens when both bounds are present and ordered. A single
/// bound, no bounds, or `start > end` all pass the full dataset through
/// unchanged. This permissiveness is a documented product decision, not an
/// oversight to fix here.
///
/// The input is never mutated; the result is a fresh copy. Rows carrying the
/// invalid-date marker cannot fall inside a window and are dropped whenever a
/// window is applied.
pub fn filter_date_range(
    rows: &[Transaction],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Transaction> {
    match (start, end) {
        (Some(start), Some(end)) if start <= end => rows
            .iter()
            .filter(|tx| {
                tx.purchase_date
                    .map(|date| start <= date && date <= end)
                    .unwrap_or(false)
            })
            .cloned()
            .collect(),
        _ => rows.to_vec(),
    }
}
