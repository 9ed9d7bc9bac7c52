//! Training and inference for the bagged category ensemble.

use crate::encoder::LabelEncoder;
use crate::error::PredictorError;
use core_types::Transaction;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};
use std::collections::HashMap;

/// Trees in the bagged ensemble.
const N_TREES: usize = 25;

type Tree = DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// The probability distribution a trained model answers with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Category → probability, over exactly the categories seen in training,
    /// in encoder (first appearance) order. Sums to 1.
    pub probabilities: Vec<(String, f64)>,
    pub top_category: String,
    pub top_probability: f64,
    /// Average ticket of the rows matching this exact (store, season) pair
    /// in the training data. Absent when the pair never co-occurred.
    pub combo_average_ticket: Option<f64>,
}

/// A trained classifier bundled with the label tables it was trained under.
///
/// The bundle is immutable once trained; prediction never rebuilds a
/// vocabulary from fresh rows.
pub struct CategoryModel {
    stores: LabelEncoder,
    seasons: LabelEncoder,
    categories: LabelEncoder,
    trees: Vec<Tree>,
    combo_tickets: HashMap<(usize, usize), f64>,
}

impl CategoryModel {
    /// Trains the ensemble on the entire (filtered) dataset.
    ///
    /// Each tree is fit on an n-sized bootstrap sample drawn from a single
    /// `StdRng` seeded with `seed`, so the whole ensemble is reproducible.
    pub fn train(rows: &[Transaction], seed: u64) -> Result<Self, PredictorError> {
        if rows.is_empty() {
            return Err(PredictorError::EmptyDataset);
        }

        let stores = LabelEncoder::fit("store", rows.iter().map(|tx| tx.store.as_str()));
        let seasons = LabelEncoder::fit("season", rows.iter().map(|tx| tx.season.as_str()));
        let categories =
            LabelEncoder::fit("category", rows.iter().map(|tx| tx.category.as_str()));

        // Encoding rows through vocabularies built from the same rows cannot
        // miss, so these errors do not escape in practice.
        let mut features: Vec<f64> = Vec::with_capacity(rows.len() * 2);
        let mut targets: Vec<i32> = Vec::with_capacity(rows.len());
        for tx in rows {
            features.push(stores.encode(&tx.store)? as f64);
            features.push(seasons.encode(&tx.season)? as f64);
            targets.push(categories.encode(&tx.category)? as i32);
        }

        let n = rows.len();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(N_TREES);
        for _ in 0..N_TREES {
            let mut sample_x: Vec<f64> = Vec::with_capacity(n * 2);
            let mut sample_y: Vec<i32> = Vec::with_capacity(n);
            for _ in 0..n {
                let row = rng.gen_range(0..n);
                sample_x.push(features[row * 2]);
                sample_x.push(features[row * 2 + 1]);
                sample_y.push(targets[row]);
            }
            let x = DenseMatrix::new(n, 2, sample_x, false)
                .map_err(|err| PredictorError::Training(err.to_string()))?;
            // Tree fitting itself is deterministic; the ensemble's
            // reproducibility rests entirely on the seeded bootstrap above.
            let tree = Tree::fit(&x, &sample_y, DecisionTreeClassifierParameters::default())
                .map_err(|err| PredictorError::Training(err.to_string()))?;
            trees.push(tree);
        }

        tracing::info!(
            rows = n,
            stores = stores.len(),
            seasons = seasons.len(),
            categories = categories.len(),
            trees = trees.len(),
            "category model trained"
        );

        let combo_tickets = combo_average_tickets(rows, &stores, &seasons)?;
        Ok(Self {
            stores,
            seasons,
            categories,
            trees,
            combo_tickets,
        })
    }

    /// Computes the probability distribution over training categories for
    /// one (store, season) pair.
    pub fn predict(&self, store: &str, season: &str) -> Result<Prediction, PredictorError> {
        let store_code = self.stores.encode(store)?;
        let season_code = self.seasons.encode(season)?;

        let x = DenseMatrix::new(1, 2, vec![store_code as f64, season_code as f64], false)
            .map_err(|err| PredictorError::Inference(err.to_string()))?;

        let mut votes = vec![0usize; self.categories.len()];
        for tree in &self.trees {
            let predicted = tree
                .predict(&x)
                .map_err(|err| PredictorError::Inference(err.to_string()))?;
            let class = predicted[0].max(0) as usize;
            if class < votes.len() {
                votes[class] += 1;
            }
        }

        let total: usize = votes.iter().sum();
        let probabilities: Vec<(String, f64)> = self
            .categories
            .labels()
            .iter()
            .zip(&votes)
            .map(|(label, &count)| (label.clone(), count as f64 / total as f64))
            .collect();

        // Strict comparison breaks ties toward the lower encoder index.
        let mut top_index = 0;
        for (index, (_, probability)) in probabilities.iter().enumerate() {
            if *probability > probabilities[top_index].1 {
                top_index = index;
            }
        }
        let (top_category, top_probability) = probabilities[top_index].clone();

        Ok(Prediction {
            probabilities,
            top_category,
            top_probability,
            combo_average_ticket: self
                .combo_tickets
                .get(&(store_code, season_code))
                .copied(),
        })
    }

    /// Categories the model can answer with, in encoder order.
    pub fn categories(&self) -> &[String] {
        self.categories.labels()
    }
}

/// Average `total_value` per (store, season) pair observed in the data.
fn combo_average_tickets(
    rows: &[Transaction],
    stores: &LabelEncoder,
    seasons: &LabelEncoder,
) -> Result<HashMap<(usize, usize), f64>, PredictorError> {
    let mut sums: HashMap<(usize, usize), (f64, usize)> = HashMap::new();
    for tx in rows {
        let key = (stores.encode(&tx.store)?, seasons.encode(&tx.season)?);
        let entry = sums.entry(key).or_insert((0.0, 0));
        entry.0 += tx.total_value;
        entry.1 += 1;
    }
    Ok(sums
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect())
}
