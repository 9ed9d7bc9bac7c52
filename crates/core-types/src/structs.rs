use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single retail sales record, one row of the dataset.
///
/// `purchase_date` is `None` when the source carried a value that could not
/// be parsed as a calendar date. Such rows are excluded from date-dependent
/// aggregates but still participate in categorical ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub purchase_date: Option<NaiveDate>,
    pub store: String,
    pub region: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub unit_price: f64,
    pub quantity: u32,
    /// Invariant: `total_value == unit_price * quantity`. Derived by the
    /// loader whenever the source lacks the column.
    pub total_value: f64,
    pub season: String,
    pub city: String,
    pub lead_type: String,
}
