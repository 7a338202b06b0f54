//! Tagged cell values for untrusted input tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell of a [`RawTable`](crate::RawTable).
///
/// Loaders decide the variant: delimited files produce `Text`/`Missing`,
/// typed sources (API clients, re-fed normalized tables) may produce
/// `Number` and `Date` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for `Missing` and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    /// Renders the cell as a trimmed text value. `Missing` and blank text yield `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Number(value) => Some(value.to_string()),
            Self::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        }
    }
}

impl CellValue {
    /// Renders the cell for a passthrough column: text is kept byte for byte,
    /// typed cells are formatted as in [`CellValue::to_text`].
    pub fn to_verbatim_text(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            other => other.to_text(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
