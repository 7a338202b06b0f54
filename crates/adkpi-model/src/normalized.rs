//! The fully-typed table produced by normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{ModelError, Result};
use crate::schema::{CanonicalField, FieldKind};
use crate::table::{RawColumn, RawTable};

/// Where a normalized column came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrigin {
    /// Mapped from a source column.
    Source,
    /// Injected as zeros because the source lacked the field.
    Defaulted,
    /// Unmapped source column kept verbatim as text.
    Passthrough,
}

/// A date column is either parsed with a single format or entirely missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "values", rename_all = "snake_case")]
pub enum DateColumn {
    /// Parsed dates; `None` only where the source cell was blank.
    Parsed(Vec<Option<NaiveDate>>),
    /// No usable dates for this table.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<Option<String>>),
    Date(DateColumn),
}

impl ColumnData {
    fn len(&self) -> Option<usize> {
        match self {
            Self::Numeric(values) => Some(values.len()),
            Self::Text(values) => Some(values.len()),
            Self::Date(DateColumn::Parsed(values)) => Some(values.len()),
            Self::Date(DateColumn::Missing) => None,
        }
    }

    fn select(&self, keep: &[bool]) -> Self {
        fn pick<T: Clone>(values: &[T], keep: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(keep)
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| value.clone())
                .collect()
        }
        match self {
            Self::Numeric(values) => Self::Numeric(pick(values, keep)),
            Self::Text(values) => Self::Text(pick(values, keep)),
            Self::Date(DateColumn::Parsed(values)) => {
                Self::Date(DateColumn::Parsed(pick(values, keep)))
            }
            Self::Date(DateColumn::Missing) => Self::Date(DateColumn::Missing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedColumn {
    pub name: String,
    pub field: Option<CanonicalField>,
    pub origin: ColumnOrigin,
    pub data: ColumnData,
}

/// A RawTable after renaming, per-cell coercion and schema completion.
///
/// Every numeric canonical field is present and holds finite values only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    row_count: usize,
    columns: Vec<NormalizedColumn>,
}

impl NormalizedTable {
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            columns: Vec::new(),
        }
    }

    pub fn push_column(&mut self, column: NormalizedColumn) -> Result<()> {
        if let Some(len) = column.data.len()
            && len != self.row_count
        {
            return Err(ModelError::LengthMismatch {
                column: column.name,
                expected: self.row_count,
                actual: len,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[NormalizedColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&NormalizedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn field(&self, field: CanonicalField) -> Option<&NormalizedColumn> {
        self.columns.iter().find(|c| c.field == Some(field))
    }

    pub fn numeric(&self, field: CanonicalField) -> Option<&[f64]> {
        match &self.field(field)?.data {
            ColumnData::Numeric(values) => Some(values),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&[Option<String>]> {
        match &self.column(name)?.data {
            ColumnData::Text(values) => Some(values),
            _ => None,
        }
    }

    pub fn campaigns(&self) -> Option<&[Option<String>]> {
        self.text(CanonicalField::Campaign.as_str())
    }

    pub fn dates(&self) -> Option<&DateColumn> {
        match &self.field(CanonicalField::Date)?.data {
            ColumnData::Date(dates) => Some(dates),
            _ => None,
        }
    }

    /// True when `field` was mapped from a source column rather than injected.
    pub fn has_source_field(&self, field: CanonicalField) -> bool {
        self.field(field)
            .is_some_and(|c| c.origin == ColumnOrigin::Source)
    }

    /// Keeps the rows whose flag is true. `keep` must have one flag per row.
    pub fn select_rows(&self, keep: &[bool]) -> Self {
        let row_count = keep.iter().take(self.row_count).filter(|k| **k).count();
        let columns = self
            .columns
            .iter()
            .map(|column| NormalizedColumn {
                data: column.data.select(keep),
                ..column.clone()
            })
            .collect();
        Self { row_count, columns }
    }

    /// Re-expresses the table as typed raw input, preserving column order.
    ///
    /// Defaulted columns are left out so that normalizing the result injects
    /// them again with the same origin. Percentage fields are written back in
    /// percent.
    pub fn to_raw(&self) -> RawTable {
        let columns = self
            .columns
            .iter()
            .filter(|column| column.origin != ColumnOrigin::Defaulted)
            .map(|column| {
                let cells = match &column.data {
                    ColumnData::Numeric(values)
                        if column.field.is_some_and(|f| f.kind() == FieldKind::Percentage) =>
                    {
                        values.iter().map(|v| CellValue::Number(to_percent(*v))).collect()
                    }
                    ColumnData::Numeric(values) => {
                        values.iter().map(|v| CellValue::Number(*v)).collect()
                    }
                    ColumnData::Text(values) => {
                        values.iter().cloned().map(CellValue::from).collect()
                    }
                    ColumnData::Date(DateColumn::Parsed(values)) => {
                        values.iter().map(|d| CellValue::from(*d)).collect()
                    }
                    ColumnData::Date(DateColumn::Missing) => {
                        vec![CellValue::Missing; self.row_count]
                    }
                };
                RawColumn::new(column.name.clone(), cells)
            })
            .collect();
        RawTable::from_columns(columns).unwrap_or_default()
    }
}

/// Scales a fraction to percent, nudging the result so that dividing it by 100
/// gives back exactly `fraction`.
fn to_percent(fraction: f64) -> f64 {
    let guess = fraction * 100.0;
    if !guess.is_finite() {
        return guess;
    }
    let mut below = guess;
    let mut above = guess;
    for _ in 0..4 {
        for candidate in [below, above] {
            if candidate / 100.0 == fraction {
                return candidate;
            }
        }
        below = below.next_down();
        above = above.next_up();
    }
    guess
}
