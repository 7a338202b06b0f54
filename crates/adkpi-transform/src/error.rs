//! Errors raised by table normalization.

use adkpi_map::MappingError;
use adkpi_model::ModelError;
use thiserror::Error;

/// Structural failures. Malformed data never ends up here; it becomes a
/// diagnostic instead.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// No source header maps to `campaign`, so rows cannot be grouped.
    #[error("no campaign column found (headers: {})", headers.join(", "))]
    MissingCampaign { headers: Vec<String> },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
