//! Polars view of a normalized table.
//!
//! Numeric columns become `Float64`, text columns `String` and the date
//! column `Date`. A missing date column is kept as an all-null `Date` column
//! so consumers can rely on the schema. Passthrough headers may repeat in
//! the source; repeats get a `_2`, `_3`, ... suffix since frame column names
//! must be unique.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame, DataType, PlSmallStr, PolarsResult};

use adkpi_model::{ColumnData, DateColumn, NormalizedTable};

/// Builds a DataFrame with one column per normalized column, in order.
pub fn normalized_to_frame(table: &NormalizedTable) -> PolarsResult<DataFrame> {
    let height = table.row_count();
    let mut taken: HashSet<String> = HashSet::new();
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .map(|column| {
            let name = PlSmallStr::from(unique_name(&mut taken, &column.name));
            match &column.data {
                ColumnData::Numeric(values) => Column::new(name, values.as_slice()),
                ColumnData::Text(values) => Column::new(name, values.as_slice()),
                ColumnData::Date(DateColumn::Parsed(values)) => {
                    Column::new(name, values.as_slice())
                }
                ColumnData::Date(DateColumn::Missing) => {
                    Column::full_null(name, height, &DataType::Date)
                }
            }
        })
        .collect();
    DataFrame::new(columns)
}

fn unique_name(taken: &mut HashSet<String>, name: &str) -> String {
    let mut candidate = name.to_string();
    let mut suffix = 2;
    while taken.contains(&candidate) {
        candidate = format!("{name}_{suffix}");
        suffix += 1;
    }
    taken.insert(candidate.clone());
    candidate
}
