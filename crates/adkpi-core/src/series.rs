//! Date-based views: daily series and period filtering.
//!
//! Both require a parsed date column; a missing one is reported as
//! [`KpiError::DateUnavailable`] so chart consumers can degrade gracefully.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use adkpi_model::{CanonicalField, DateColumn, NormalizedTable};

use crate::error::{KpiError, Result};

fn parsed_dates(table: &NormalizedTable) -> Result<&[Option<NaiveDate>]> {
    match table.dates() {
        Some(DateColumn::Parsed(dates)) => Ok(dates),
        Some(DateColumn::Missing) | None => Err(KpiError::DateUnavailable),
    }
}

/// Per-date sums of `field`, in date order. Rows without a date are skipped.
pub fn daily_series(table: &NormalizedTable, field: CanonicalField) -> Result<Vec<(NaiveDate, f64)>> {
    let values = table
        .numeric(field)
        .ok_or(KpiError::NotNumeric(field))?;
    let dates = parsed_dates(table)?;

    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, value) in dates.iter().zip(values) {
        if let Some(date) = date {
            *by_day.entry(*date).or_default() += value;
        }
    }
    Ok(by_day.into_iter().collect())
}

/// Keeps rows dated within `[from, to]`; either bound may be open.
///
/// Rows without a date are dropped whenever a bound is given.
pub fn filter_by_date(
    table: &NormalizedTable,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<NormalizedTable> {
    let dates = parsed_dates(table)?;
    if from.is_none() && to.is_none() {
        return Ok(table.clone());
    }
    let keep: Vec<bool> = dates
        .iter()
        .map(|date| {
            date.is_some_and(|date| {
                from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
            })
        })
        .collect();
    Ok(table.select_rows(&keep))
}
