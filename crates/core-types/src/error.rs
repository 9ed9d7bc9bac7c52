use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown region code: {0}")]
    UnknownRegion(String),
}
