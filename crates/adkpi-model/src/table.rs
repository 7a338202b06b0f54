#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// Untrusted input: ordered named columns of heterogeneous cells.
///
/// The only structural guarantee is that every column has `row_count` cells.
/// Column names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    row_count: usize,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<RawColumn>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Builds a table from row-major data. Short rows are padded with
    /// `Missing`; cells beyond the header count are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<RawColumn> = headers
            .into_iter()
            .map(|name| RawColumn::new(name, Vec::with_capacity(row_count)))
            .collect();
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or(CellValue::Missing));
            }
        }
        Self { columns, row_count }
    }

    pub fn push_column(&mut self, column: RawColumn) -> Result<()> {
        if self.columns.is_empty() {
            self.row_count = column.cells.len();
        } else if column.cells.len() != self.row_count {
            return Err(ModelError::LengthMismatch {
                column: column.name,
                expected: self.row_count,
                actual: column.cells.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<RawColumn> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
