use core_types::Region;
use serde::{Deserialize, Serialize};

/// The standardized bundle of scalar KPIs for one (possibly filtered) dataset.
///
/// This struct is a convenience output of the `KpiEngine` and serves as the
/// data transfer object for summary results handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub transaction_count: usize,
    pub total_sales: f64,
    pub total_quantity: u64,
    /// Always defined: 0 on an empty dataset by policy.
    pub average_ticket: f64,
    // Option<> because extrema and mean are undefined with 0 rows.
    pub max_sale: Option<f64>,
    pub min_sale: Option<f64>,
    pub mean_sale: Option<f64>,
}

impl SalesReport {
    /// Creates a new, zeroed-out SalesReport.
    pub fn new() -> Self {
        Self {
            transaction_count: 0,
            total_sales: 0.0,
            total_quantity: 0,
            average_ticket: 0.0,
            max_sale: None,
            min_sale: None,
            mean_sale: None,
        }
    }
}

impl Default for SalesReport {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the region aggregate: every known region appears exactly once,
/// zero-filled when absent from the data, with coordinates for mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTotal {
    pub region: Region,
    pub latitude: f64,
    pub longitude: f64,
    pub total: f64,
}
