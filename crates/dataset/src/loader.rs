//! Reading the external record store into typed transaction rows.

use crate::error::DatasetError;
use chrono::NaiveDate;
use core_types::Transaction;
use polars::prelude::*;
use std::path::Path;

/// Columns the downstream computations depend on. `total_value` is absent on
/// purpose: it is derived from `unit_price * quantity` when the store lacks it.
const REQUIRED_COLUMNS: [&str; 11] = [
    "purchase_date",
    "store",
    "region",
    "category",
    "size",
    "color",
    "unit_price",
    "quantity",
    "season",
    "city",
    "lead_type",
];

/// Reads all rows from the delimited record store at `path`.
///
/// Every row survives the read; a purchase date that cannot be parsed becomes
/// the `None` marker on the row rather than an error, so the row still
/// participates in categorical aggregates.
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>, DatasetError> {
    let df = CsvReader::from_path(path)?.has_header(true).finish()?;

    let names = df.get_column_names();
    for required in REQUIRED_COLUMNS {
        if !names.contains(&required) {
            return Err(DatasetError::MissingRequiredColumn(required.to_string()));
        }
    }

    if df.height() == 0 {
        return Err(DatasetError::SourceUnavailable(format!(
            "record store at {} holds no rows",
            path.display()
        )));
    }

    let dates = str_column(&df, "purchase_date")?;
    let stores = str_column(&df, "store")?;
    let regions = str_column(&df, "region")?;
    let categories = str_column(&df, "category")?;
    let sizes = str_column(&df, "size")?;
    let colors = str_column(&df, "color")?;
    let seasons = str_column(&df, "season")?;
    let cities = str_column(&df, "city")?;
    let lead_types = str_column(&df, "lead_type")?;
    let unit_prices = f64_column(&df, "unit_price")?;
    let quantities = u32_column(&df, "quantity")?;
    let totals = if names.contains(&"total_value") {
        Some(f64_column(&df, "total_value")?)
    } else {
        None
    };

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let unit_price = unit_prices[i];
        let quantity = quantities[i];
        let total_value = match &totals {
            Some(values) => values[i],
            None => unit_price * quantity as f64,
        };
        rows.push(Transaction {
            purchase_date: parse_purchase_date(&dates[i]),
            store: stores[i].clone(),
            region: regions[i].clone(),
            category: categories[i].clone(),
            size: sizes[i].clone(),
            color: colors[i].clone(),
            unit_price,
            quantity,
            total_value,
            season: seasons[i].clone(),
            city: cities[i].clone(),
            lead_type: lead_types[i].clone(),
        });
    }

    tracing::debug!(rows = rows.len(), path = %path.display(), "record store read");
    Ok(rows)
}

/// Parses a purchase date in ISO form, falling back to the day-first form
/// common in the source data. Anything else is the invalid-date marker.
pub fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

fn str_column(df: &DataFrame, name: &str) -> Result<Vec<String>, DatasetError> {
    let series = df.column(name)?.cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.unwrap_or("").to_string())
        .collect())
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, DatasetError> {
    let series = df.column(name)?.cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(0.0))
        .collect())
}

/// Null, negative, and out-of-range counts are coerced to the nearest valid
/// quantity rather than rejected; coercions are logged so bad source rows
/// stay observable.
fn u32_column(df: &DataFrame, name: &str) -> Result<Vec<u32>, DatasetError> {
    let series = df.column(name)?.cast(&DataType::Int64)?;
    Ok(series
        .i64()?
        .into_iter()
        .map(|value| {
            let raw = value.unwrap_or(0);
            let coerced = raw.clamp(0, u32::MAX as i64) as u32;
            if i64::from(coerced) != raw || value.is_none() {
                tracing::warn!(column = name, raw = ?value, coerced, "coerced numeric cell");
            }
            coerced
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "purchase_date,store,region,category,size,color,unit_price,quantity,season,city,lead_type";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn reads_rows_and_derives_total() {
        let file = write_csv(&[
            HEADER,
            "2024-03-01,Loja A,SP,Camiseta,M,Preto,100,3,Verão,São Paulo,Orgânico",
            "2024-03-02,Loja B,RJ,Calça,G,Azul,80,2,Verão,Rio de Janeiro,Anúncio",
        ]);

        let rows = read_transactions(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_value, 300.0);
        assert_eq!(rows[1].total_value, 160.0);
        assert_eq!(
            rows[0].purchase_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn pre_existing_total_column_is_kept() {
        let file = write_csv(&[
            "purchase_date,store,region,category,size,color,unit_price,quantity,total_value,season,city,lead_type",
            "2024-03-01,Loja A,SP,Camiseta,M,Preto,100,3,300,Verão,São Paulo,Orgânico",
        ]);

        let rows = read_transactions(file.path()).unwrap();
        assert_eq!(rows[0].total_value, 300.0);
    }

    #[test]
    fn unparsable_date_becomes_marker_not_error() {
        let file = write_csv(&[
            HEADER,
            "not-a-date,Loja A,SP,Camiseta,M,Preto,100,3,Verão,São Paulo,Orgânico",
            "15/03/2024,Loja A,SP,Calça,M,Preto,50,1,Verão,São Paulo,Orgânico",
        ]);

        let rows = read_transactions(file.path()).unwrap();
        assert_eq!(rows[0].purchase_date, None);
        assert_eq!(
            rows[1].purchase_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
    }

    #[test]
    fn negative_quantity_is_coerced_to_zero() {
        let file = write_csv(&[
            HEADER,
            "2024-03-01,Loja A,SP,Camiseta,M,Preto,100,-3,Verão,São Paulo,Orgânico",
        ]);

        let rows = read_transactions(file.path()).unwrap();
        assert_eq!(rows[0].quantity, 0);
        assert_eq!(rows[0].total_value, 0.0);
    }

    #[test]
    fn missing_required_column_is_surfaced() {
        let file = write_csv(&[
            "store,region,category,size,color,unit_price,quantity,season,city,lead_type",
            "Loja A,SP,Camiseta,M,Preto,100,3,Verão,São Paulo,Orgânico",
        ]);

        let err = read_transactions(file.path()).unwrap_err();
        match err {
            DatasetError::MissingRequiredColumn(column) => {
                assert_eq!(column, "purchase_date")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
