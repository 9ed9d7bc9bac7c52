use serde::{Deserialize, Serialize};
use std::fmt;

/// Which path the dataset source took to produce its rows.
///
/// A failed read is absorbed, never surfaced as a hard error; the caller
/// only learns about it through this status so it can be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceStatus {
    /// Rows were read from the external record store.
    Loaded,
    /// The read failed and a deterministic synthetic dataset was generated.
    Synthesized,
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceStatus::Loaded => write!(f, "loaded"),
            SourceStatus::Synthesized => write!(f, "synthesized"),
        }
    }
}

/// The categorical dimensions a grouped sum can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupDimension {
    Store,
    Category,
    Region,
}

impl GroupDimension {
    /// Returns the label of `dimension` for a given transaction.
    pub fn key_of<'a>(&self, tx: &'a crate::Transaction) -> &'a str {
        match self {
            GroupDimension::Store => &tx.store,
            GroupDimension::Category => &tx.category,
            GroupDimension::Region => &tx.region,
        }
    }
}
