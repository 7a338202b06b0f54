//! Campaign table normalization.
//!
//! - **normalization**: numeric (locale-aware) and date parsing of single cells and columns
//! - **normalizer**: [`TableNormalizer`], which maps headers, coerces columns and completes the schema
//! - **frame**: conversion of a [`NormalizedTable`](adkpi_model::NormalizedTable) to a Polars DataFrame

pub mod error;
pub mod frame;
pub mod normalization;
pub mod normalizer;

pub use error::NormalizeError;
pub use frame::normalized_to_frame;
pub use normalization::{
    DateColumnParse, DateFormat, NumericParse, normalize_date, normalize_date_column,
    normalize_numeric, normalize_numeric_percentage, normalize_numeric_percentage_with,
    normalize_numeric_with,
};
pub use normalizer::TableNormalizer;
