use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("No rows to aggregate: {0} is undefined on an empty dataset")]
    EmptyDataset(String),
}
