//! Polars AnyValue utility functions.

use adkpi_model::CellValue;
use polars::prelude::*;

/// Converts a Polars `AnyValue` into a tagged cell.
///
/// Integers and floats become `Number`, strings become `Text`, null becomes
/// `Missing`. Booleans and anything else are rendered as text.
///
/// # Examples
///
/// ```
/// use adkpi_model::CellValue;
/// use polars::prelude::AnyValue;
/// use adkpi_common::any_to_cell;
///
/// assert_eq!(any_to_cell(AnyValue::Null), CellValue::Missing);
/// assert_eq!(any_to_cell(AnyValue::Int32(42)), CellValue::Number(42.0));
/// assert_eq!(any_to_cell(AnyValue::String("R$ 10,00")), CellValue::text("R$ 10,00"));
/// ```
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.to_string()),
        other => CellValue::text(any_to_string(other)),
    }
}

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number with at most four decimal places, without
/// trailing zeros.
///
/// # Examples
///
/// ```
/// use adkpi_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v:.4}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
