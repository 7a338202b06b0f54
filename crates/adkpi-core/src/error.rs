//! Errors raised by aggregation and time-based operations.

use adkpi_model::CanonicalField;
use adkpi_transform::NormalizeError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KpiError {
    /// The table has no `campaign` column to group by.
    #[error("table has no campaign column; KPIs cannot be grouped")]
    MissingCampaign,

    /// Grouping was requested on a column that is absent or not text.
    #[error("`{column}` is not a text column of the table")]
    NotGroupable { column: String },

    #[error("`{0}` is not a numeric field")]
    NotNumeric(CanonicalField),

    /// The date column is absent or was marked missing during normalization.
    #[error("no usable date column")]
    DateUnavailable,

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("aggregation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, KpiError>;
