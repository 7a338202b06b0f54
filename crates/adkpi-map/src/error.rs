//! Error types for mapping operations.

use std::path::PathBuf;

use adkpi_model::CanonicalField;
use thiserror::Error;

/// Errors from alias loading and header mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Alias target is not a canonical field name.
    #[error("alias `{header}` targets unknown field `{target}`")]
    UnknownTarget { header: String, target: String },

    /// The same header is aliased to two different fields.
    #[error("alias `{header}` already maps to `{existing}`, cannot remap to `{requested}`")]
    AliasConflict {
        header: String,
        existing: CanonicalField,
        requested: CanonicalField,
    },

    /// Two source headers resolve to the same field and collisions are rejected.
    #[error("columns `{first}` and `{second}` both map to `{field}`")]
    Collision {
        field: CanonicalField,
        first: String,
        second: String,
    },

    /// Alias overlay could not be parsed.
    #[error("invalid alias file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Alias overlay could not be read.
    #[error("failed to read alias file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
