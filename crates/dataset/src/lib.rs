//! # Vitrine Dataset Layer
//!
//! This crate owns the lifecycle of a transaction dataset up to the point
//! where the analytic crates take over: obtaining rows from the external
//! record store, normalizing them, falling back to a deterministic synthetic
//! dataset when the store cannot be read, and narrowing rows to a date window.
//!
//! ## Architectural Principles
//!
//! - **Absorb, don't crash:** a failed read is never a hard error. The source
//!   silently switches to synthetic generation and reports which path it took
//!   through [`SourceStatus`]. The one exception is a record store that is
//!   readable but structurally unusable (a required column is missing), which
//!   surfaces as [`DatasetError::MissingRequiredColumn`].
//! - **Deterministic synthesis:** all randomness comes from an injected,
//!   seedable source, so the synthetic dataset is reproducible bit-for-bit.

pub mod error;
pub mod filter;
pub mod loader;
pub mod synthetic;

use core_types::{SourceStatus, Transaction};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

pub use error::DatasetError;
pub use filter::filter_date_range;
pub use synthetic::SYNTHETIC_ROWS;

/// Produces a validated transaction dataset from the record store at `path`,
/// or from the seeded synthetic generator when the store cannot be read.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    path: PathBuf,
    seed: u64,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            path: path.into(),
            seed,
        }
    }

    /// Loads the dataset, reporting which path was taken.
    ///
    /// Read failures (missing file, malformed delimited text, empty store)
    /// are absorbed: the caller receives the synthetic dataset together with
    /// `SourceStatus::Synthesized`. A store that parses but lacks a required
    /// column is a configuration problem, not a transient one, and is
    /// surfaced as `MissingRequiredColumn`.
    pub fn load(&self) -> Result<(Vec<Transaction>, SourceStatus), DatasetError> {
        match loader::read_transactions(&self.path) {
            Ok(rows) => Ok((rows, SourceStatus::Loaded)),
            Err(err @ DatasetError::MissingRequiredColumn(_)) => Err(err),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "record store unavailable, generating synthetic dataset"
                );
                let mut rng = StdRng::seed_from_u64(self.seed);
                Ok((
                    synthetic::generate(&mut rng),
                    SourceStatus::Synthesized,
                ))
            }
        }
    }
}
