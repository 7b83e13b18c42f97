use triviaviz_core::error::SourceError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Invalid chart request: {0}")]
    InvalidChart(String),
}
