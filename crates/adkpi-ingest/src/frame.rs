//! Polars DataFrame to raw table conversion.
//!
//! Lets loaders that already produce a DataFrame (spreadsheets, parquet,
//! polars' own CSV reader) feed the normalizer.

use polars::prelude::{AnyValue, DataFrame};

use adkpi_common::any_to_cell;
use adkpi_model::{CellValue, RawColumn, RawTable};

use crate::error::Result;

/// Converts every column of `df`, in order, into raw cells.
pub fn raw_table_from_frame(df: &DataFrame) -> Result<RawTable> {
    let height = df.height();
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let cells: Vec<CellValue> = (0..height)
                .map(|idx| any_to_cell(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect();
            RawColumn::new(column.name().as_str(), cells)
        })
        .collect();
    Ok(RawTable::from_columns(columns)?)
}
