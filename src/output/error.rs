use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output file '{0}'")]
    Create(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing CSV file '{0}'")]
    Csv(PathBuf, #[source] PolarsError),

    #[error("Encoding error writing parquet file '{0}'")]
    Parquet(PathBuf, #[source] PolarsError),

    #[error("Failed to write JSON lines to '{0}'")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("I/O error writing '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed building DataFrame: {0}")]
    Frame(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Unknown output format '{0}', expected csv, parquet or json")]
    UnknownFormat(String),
}
