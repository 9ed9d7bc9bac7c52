use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    /// A column the downstream computation depends on is absent from the
    /// record store. Surfaced to the caller; never absorbed.
    #[error("Missing required column: {0}")]
    MissingRequiredColumn(String),

    /// The record store could not be read at all. Recovered locally by
    /// substituting the synthetic dataset.
    #[error("Record store unavailable: {0}")]
    SourceUnavailable(String),

    #[error(transparent)]
    Table(#[from] polars::error::PolarsError),
}
