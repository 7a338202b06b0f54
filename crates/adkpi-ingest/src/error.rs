//! Error types for loading campaign data.

use std::path::PathBuf;

use adkpi_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// No header row: the input is empty or only blank lines.
    #[error("{source_name} contains no header row")]
    Empty { source_name: String },

    /// Platform API payload does not have the expected shape.
    #[error("invalid {platform} record: {source}")]
    Decode {
        platform: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to convert data frame: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
