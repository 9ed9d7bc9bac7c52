//! Stable label-to-integer vocabularies for categorical features.

use crate::error::PredictorError;
use std::collections::HashMap;

/// A frozen label↔integer table for one categorical column.
///
/// Codes are assigned in order of first appearance in the training rows, so
/// encode/decode round-trips deterministically within one trained model.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    column: String,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Builds the vocabulary from the distinct values observed, in order of
    /// first appearance.
    pub fn fit<'a>(column: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for value in values {
            if !index.contains_key(value) {
                index.insert(value.to_string(), labels.len());
                labels.push(value.to_string());
            }
        }
        Self {
            column: column.to_string(),
            labels,
            index,
        }
    }

    /// Maps a label to its code, failing explicitly for unseen labels.
    pub fn encode(&self, value: &str) -> Result<usize, PredictorError> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| PredictorError::UnknownCategoryValue {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }

    /// Maps a code back to its label.
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    /// All labels, in code order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_first_appearance() {
        let encoder = LabelEncoder::fit("store", ["Loja B", "Loja A", "Loja B", "Loja C"]);
        assert_eq!(encoder.encode("Loja B").unwrap(), 0);
        assert_eq!(encoder.encode("Loja A").unwrap(), 1);
        assert_eq!(encoder.encode("Loja C").unwrap(), 2);
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn round_trip() {
        let encoder = LabelEncoder::fit("season", ["Verão", "Inverno"]);
        for label in encoder.labels() {
            let code = encoder.encode(label).unwrap();
            assert_eq!(encoder.decode(code), Some(label.as_str()));
        }
    }

    #[test]
    fn unseen_label_is_an_explicit_error() {
        let encoder = LabelEncoder::fit("store", ["Loja A"]);
        let err = encoder.encode("Loja Z").unwrap_err();
        match err {
            PredictorError::UnknownCategoryValue { column, value } => {
                assert_eq!(column, "store");
                assert_eq!(value, "Loja Z");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
