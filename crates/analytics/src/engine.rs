use crate::error::AnalyticsError;
use crate::report::{RegionTotal, SalesReport};
use core_types::{GroupDimension, Region, Transaction};
use std::collections::{BTreeMap, HashMap};

/// A stateless calculator for deriving KPIs and aggregates from sales rows.
#[derive(Debug, Default)]
pub struct KpiEngine {}

impl KpiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of `total_value` over all rows.
    pub fn total_sales(&self, rows: &[Transaction]) -> f64 {
        rows.iter().map(|tx| tx.total_value).sum()
    }

    /// Sum of `quantity` over all rows.
    pub fn total_quantity(&self, rows: &[Transaction]) -> u64 {
        rows.iter().map(|tx| tx.quantity as u64).sum()
    }

    /// Total sales divided by row count. Returns 0 on an empty dataset by
    /// policy, never an error or NaN.
    pub fn average_ticket(&self, rows: &[Transaction]) -> f64 {
        if rows.is_empty() {
            return 0.0;
        }
        self.total_sales(rows) / rows.len() as f64
    }

    /// Largest per-row `total_value`. Undefined with 0 rows.
    pub fn max_sale(&self, rows: &[Transaction]) -> Result<f64, AnalyticsError> {
        rows.iter()
            .map(|tx| tx.total_value)
            .fold(None, |best: Option<f64>, value| {
                Some(best.map_or(value, |b| b.max(value)))
            })
            .ok_or_else(|| AnalyticsError::EmptyDataset("max_sale".to_string()))
    }

    /// Smallest per-row `total_value`. Undefined with 0 rows.
    pub fn min_sale(&self, rows: &[Transaction]) -> Result<f64, AnalyticsError> {
        rows.iter()
            .map(|tx| tx.total_value)
            .fold(None, |best: Option<f64>, value| {
                Some(best.map_or(value, |b| b.min(value)))
            })
            .ok_or_else(|| AnalyticsError::EmptyDataset("min_sale".to_string()))
    }

    /// Mean per-row `total_value`. Undefined with 0 rows.
    pub fn mean_sale(&self, rows: &[Transaction]) -> Result<f64, AnalyticsError> {
        if rows.is_empty() {
            return Err(AnalyticsError::EmptyDataset("mean_sale".to_string()));
        }
        Ok(self.total_sales(rows) / rows.len() as f64)
    }

    /// Bundles the scalar KPIs into a single report.
    ///
    /// The bundled form carries the undefined-on-empty metrics as `None`
    /// instead of an error, so an empty dataset still yields a renderable
    /// report.
    pub fn report(&self, rows: &[Transaction]) -> SalesReport {
        SalesReport {
            transaction_count: rows.len(),
            total_sales: self.total_sales(rows),
            total_quantity: self.total_quantity(rows),
            average_ticket: self.average_ticket(rows),
            max_sale: self.max_sale(rows).ok(),
            min_sale: self.min_sale(rows).ok(),
            mean_sale: self.mean_sale(rows).ok(),
        }
    }

    /// Sum of `total_value` grouped by calendar month, sorted chronologically.
    ///
    /// Keys are `YYYY-MM`. Rows carrying the invalid-date marker are excluded;
    /// months with no transactions are not synthesized.
    pub fn monthly_trend(&self, rows: &[Transaction]) -> Vec<(String, f64)> {
        use chrono::Datelike;

        let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for tx in rows {
            if let Some(date) = tx.purchase_date {
                *months.entry((date.year(), date.month())).or_insert(0.0) += tx.total_value;
            }
        }
        months
            .into_iter()
            .map(|((year, month), total)| (format!("{year:04}-{month:02}"), total))
            .collect()
    }

    /// Sum of `total_value` grouped by one categorical dimension.
    ///
    /// Keys appear in order of first appearance; consumers re-sort for
    /// display.
    pub fn group_sum(
        &self,
        rows: &[Transaction],
        dimension: GroupDimension,
    ) -> Vec<(String, f64)> {
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, f64> = HashMap::new();
        for tx in rows {
            let key = dimension.key_of(tx);
            if !totals.contains_key(key) {
                order.push(key.to_string());
            }
            *totals.entry(key.to_string()).or_insert(0.0) += tx.total_value;
        }
        order
            .into_iter()
            .map(|key| {
                let total = totals[&key];
                (key, total)
            })
            .collect()
    }

    /// Sum of `total_value` by region, left-joined against the closed region
    /// table.
    ///
    /// Every one of the 27 known codes appears exactly once, with 0 for
    /// regions absent from the data. Labels outside the closed set cannot be
    /// mapped to coordinates and are skipped.
    pub fn region_sum(&self, rows: &[Transaction]) -> Vec<RegionTotal> {
        let mut totals: HashMap<Region, f64> = HashMap::new();
        for tx in rows {
            if let Ok(region) = Region::from_code(&tx.region) {
                *totals.entry(region).or_insert(0.0) += tx.total_value;
            }
        }
        Region::ALL
            .iter()
            .map(|&region| {
                let (latitude, longitude) = region.coordinates();
                RegionTotal {
                    region,
                    latitude,
                    longitude,
                    total: totals.get(&region).copied().unwrap_or(0.0),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: Option<(i32, u32, u32)>, region: &str, total: f64) -> Transaction {
        Transaction {
            purchase_date: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            store: "Loja A".to_string(),
            region: region.to_string(),
            category: "Camiseta".to_string(),
            size: "M".to_string(),
            color: "Preto".to_string(),
            unit_price: total,
            quantity: 1,
            total_value: total,
            season: "Verão".to_string(),
            city: "São Paulo".to_string(),
            lead_type: "Orgânico".to_string(),
        }
    }

    #[test]
    fn average_ticket_is_zero_on_empty() {
        let engine = KpiEngine::new();
        assert_eq!(engine.average_ticket(&[]), 0.0);
    }

    #[test]
    fn average_ticket_single_row() {
        let engine = KpiEngine::new();
        let rows = vec![tx(Some((2024, 1, 1)), "SP", 150.0)];
        assert_eq!(engine.average_ticket(&rows), 150.0);
    }

    #[test]
    fn extrema_fail_explicitly_on_empty() {
        let engine = KpiEngine::new();
        assert!(engine.max_sale(&[]).is_err());
        assert!(engine.min_sale(&[]).is_err());
        assert!(engine.mean_sale(&[]).is_err());
    }

    #[test]
    fn scalar_kpis() {
        let engine = KpiEngine::new();
        let rows = vec![
            tx(Some((2024, 1, 1)), "SP", 100.0),
            tx(Some((2024, 1, 2)), "RJ", 300.0),
        ];
        assert_eq!(engine.total_sales(&rows), 400.0);
        assert_eq!(engine.total_quantity(&rows), 2);
        assert_eq!(engine.max_sale(&rows).unwrap(), 300.0);
        assert_eq!(engine.min_sale(&rows).unwrap(), 100.0);
        assert_eq!(engine.mean_sale(&rows).unwrap(), 200.0);
    }

    #[test]
    fn report_on_empty_dataset_is_renderable() {
        let engine = KpiEngine::new();
        let report = engine.report(&[]);
        assert_eq!(report.average_ticket, 0.0);
        assert_eq!(report.max_sale, None);
        assert_eq!(report, SalesReport::new());
    }

    #[test]
    fn monthly_trend_is_chronological_and_skips_invalid_dates() {
        let engine = KpiEngine::new();
        let rows = vec![
            tx(Some((2024, 3, 5)), "SP", 10.0),
            tx(Some((2024, 1, 9)), "SP", 20.0),
            tx(None, "SP", 999.0),
            tx(Some((2024, 3, 20)), "SP", 30.0),
            tx(Some((2023, 12, 31)), "SP", 5.0),
        ];
        let trend = engine.monthly_trend(&rows);
        assert_eq!(
            trend,
            vec![
                ("2023-12".to_string(), 5.0),
                ("2024-01".to_string(), 20.0),
                ("2024-03".to_string(), 40.0),
            ]
        );
    }

    #[test]
    fn group_sum_preserves_first_appearance_order() {
        let engine = KpiEngine::new();
        let rows = vec![
            tx(Some((2024, 1, 1)), "RJ", 10.0),
            tx(Some((2024, 1, 2)), "SP", 20.0),
            tx(Some((2024, 1, 3)), "RJ", 30.0),
        ];
        assert_eq!(
            engine.group_sum(&rows, GroupDimension::Region),
            vec![("RJ".to_string(), 40.0), ("SP".to_string(), 20.0)]
        );
    }

    #[test]
    fn region_sum_always_covers_all_27_regions() {
        let engine = KpiEngine::new();
        let rows = vec![
            tx(Some((2024, 1, 1)), "SP", 100.0),
            tx(Some((2024, 1, 2)), "SP", 50.0),
            tx(Some((2024, 1, 3)), "Atlantis", 1.0),
        ];
        let totals = engine.region_sum(&rows);
        assert_eq!(totals.len(), 27);
        let sp = totals.iter().find(|t| t.region == Region::Sp).unwrap();
        assert_eq!(sp.total, 150.0);
        let absent = totals.iter().filter(|t| t.total == 0.0).count();
        assert_eq!(absent, 26);
    }

    #[test]
    fn region_sum_on_empty_dataset_is_zero_filled() {
        let engine = KpiEngine::new();
        let totals = engine.region_sum(&[]);
        assert_eq!(totals.len(), 27);
        assert!(totals.iter().all(|t| t.total == 0.0));
    }
}
