//! Retrain-or-reuse boundary keyed by a content fingerprint of the dataset.

use crate::error::PredictorError;
use crate::model::CategoryModel;
use core_types::Transaction;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A stable content hash over every field of every row.
///
/// Floats are hashed through their bit patterns. Insertion order matters:
/// two datasets with the same rows in a different order fingerprint
/// differently and therefore retrain.
pub fn dataset_fingerprint(rows: &[Transaction]) -> u64 {
    let mut hasher = DefaultHasher::new();
    rows.len().hash(&mut hasher);
    for tx in rows {
        tx.purchase_date.hash(&mut hasher);
        tx.store.hash(&mut hasher);
        tx.region.hash(&mut hasher);
        tx.category.hash(&mut hasher);
        tx.size.hash(&mut hasher);
        tx.color.hash(&mut hasher);
        tx.unit_price.to_bits().hash(&mut hasher);
        tx.quantity.hash(&mut hasher);
        tx.total_value.to_bits().hash(&mut hasher);
        tx.season.hash(&mut hasher);
        tx.city.hash(&mut hasher);
        tx.lead_type.hash(&mut hasher);
    }
    hasher.finish()
}

/// Caches the most recently trained model, keyed by dataset fingerprint.
///
/// Identical filtered datasets reuse the cached model deterministically;
/// anything else retrains. Since training itself is seeded, a reused model
/// answers exactly as a fresh retrain would.
pub struct ModelCache {
    seed: u64,
    entry: Option<(u64, CategoryModel)>,
}

impl ModelCache {
    pub fn new(seed: u64) -> Self {
        Self { seed, entry: None }
    }

    /// Returns a model trained on `rows`, reusing the cached one when the
    /// fingerprint matches.
    pub fn train_or_reuse(
        &mut self,
        rows: &[Transaction],
    ) -> Result<&CategoryModel, PredictorError> {
        let fingerprint = dataset_fingerprint(rows);
        let hit = matches!(&self.entry, Some((cached, _)) if *cached == fingerprint);
        if !hit {
            tracing::debug!(fingerprint, "fingerprint miss, retraining");
            let model = CategoryModel::train(rows, self.seed)?;
            self.entry = Some((fingerprint, model));
        }
        let (_, model) = self.entry.as_ref().expect("entry was just populated");
        Ok(model)
    }
}
