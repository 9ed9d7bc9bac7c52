use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    /// Training requires at least one row; the encoders would otherwise be
    /// empty and no tree could be fit.
    #[error("No rows to train on")]
    EmptyDataset,

    /// The requested value has no representation in the vocabulary learned
    /// at training time. Surfaced to the caller, never retried.
    #[error("Value {value:?} for {column} was never seen in training")]
    UnknownCategoryValue { column: String, value: String },

    #[error("Model training failed: {0}")]
    Training(String),

    #[error("Model inference failed: {0}")]
    Inference(String),
}
