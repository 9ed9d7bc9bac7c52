//! Deterministic synthetic dataset, the fallback when the record store
//! cannot be read.

use chrono::{Duration, NaiveDate};
use core_types::Transaction;
use rand::Rng;

/// Number of rows the generator always produces.
pub const SYNTHETIC_ROWS: usize = 100;

/// First purchase date of the synthetic series; one day is added per row.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid constant date")
}

const STORES: [&str; 3] = ["Loja A", "Loja B", "Loja C"];
const REGIONS: [&str; 4] = ["SP", "RJ", "MG", "RS"];
const CATEGORIES: [&str; 4] = ["Camiseta", "Calça", "Vestido", "Jaqueta"];
const SIZES: [&str; 4] = ["P", "M", "G", "GG"];
const COLORS: [&str; 4] = ["Preto", "Branco", "Azul", "Vermelho"];
const SEASONS: [&str; 4] = ["Verão", "Outono", "Inverno", "Primavera"];
const CITIES: [&str; 4] = [
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Porto Alegre",
];
const LEAD_TYPES: [&str; 2] = ["Orgânico", "Anúncio"];

/// Generates the synthetic dataset from the injected random source.
///
/// Dates form a consecutive daily series with no gaps or duplicates; every
/// categorical field is drawn with replacement from its fixed vocabulary;
/// `total_value` is derived after generation so the dataset invariant holds
/// by construction. Same `rng` state in, same 100 rows out.
pub fn generate(rng: &mut impl Rng) -> Vec<Transaction> {
    let start = start_date();
    (0..SYNTHETIC_ROWS)
        .map(|index| {
            let unit_price = rng.gen_range(50..=199) as f64;
            let quantity = rng.gen_range(1..=9u32);
            Transaction {
                purchase_date: Some(start + Duration::days(index as i64)),
                store: pick(rng, &STORES),
                region: pick(rng, &REGIONS),
                category: pick(rng, &CATEGORIES),
                size: pick(rng, &SIZES),
                color: pick(rng, &COLORS),
                unit_price,
                quantity,
                total_value: unit_price * quantity as f64,
                season: pick(rng, &SEASONS),
                city: pick(rng, &CITIES),
                lead_type: pick(rng, &LEAD_TYPES),
            }
        })
        .collect()
}

fn pick(rng: &mut impl Rng, vocabulary: &[&str]) -> String {
    vocabulary[rng.gen_range(0..vocabulary.len())].to_string()
}
