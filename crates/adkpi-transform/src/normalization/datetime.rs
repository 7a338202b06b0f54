//! Calendar date normalization.
//!
//! A date column is read with exactly one format. Formats are tried in a fixed
//! order against every non-blank cell; the first format that reads all of
//! them wins. There is no per-cell fallback, so `03/04/2024` can never be
//! read as March in one row and April in the next.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use adkpi_model::CellValue;

/// Supported date layouts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// ISO 8601 extended: `2024-03-05`, `2024-03-05T10:00:00`, RFC 3339.
    Iso,
    /// `05/03/2024`
    DayMonthYear,
    /// `2024-3-5` and other non-padded year-first dates.
    YearMonthDay,
}

/// Formats in trial order.
pub const DATE_FORMATS: [DateFormat; 3] = [
    DateFormat::Iso,
    DateFormat::DayMonthYear,
    DateFormat::YearMonthDay,
];

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl DateFormat {
    /// Parses trimmed, non-empty text with this format.
    pub fn parse(self, value: &str) -> Option<NaiveDate> {
        match self {
            Self::Iso => parse_iso(value),
            Self::DayMonthYear => NaiveDate::parse_from_str(value, "%d/%m/%Y").ok(),
            Self::YearMonthDay => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
        }
    }

    fn parse_cell(self, cell: &CellValue) -> Option<NaiveDate> {
        match cell {
            CellValue::Date(date) => Some(*date),
            CellValue::Text(text) => self.parse(text.trim()),
            CellValue::Number(_) | CellValue::Missing => None,
        }
    }
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = ISO_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }
    if is_extended_date(value) {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
    }
    None
}

/// `YYYY-MM-DD` with zero-padded month and day.
fn is_extended_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(idx, b)| idx == 4 || idx == 7 || b.is_ascii_digit())
}

/// Parses a single cell, first format wins.
///
/// Prefer [`normalize_date_column`] for whole columns.
pub fn normalize_date(raw: &CellValue) -> Option<NaiveDate> {
    if raw.is_blank() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| format.parse_cell(raw))
}

/// Outcome of reading a whole date column.
#[derive(Debug, Clone, PartialEq)]
pub enum DateColumnParse {
    /// One format read every non-blank cell; blank cells stay `None`.
    Parsed {
        format: DateFormat,
        values: Vec<Option<NaiveDate>>,
    },
    /// Every cell is blank.
    Empty,
    /// No single format read every non-blank cell. `rejected` is the fewest
    /// failures under any format.
    Unparseable { rejected: usize },
}

pub fn normalize_date_column(cells: &[CellValue]) -> DateColumnParse {
    if cells.iter().all(CellValue::is_blank) {
        return DateColumnParse::Empty;
    }

    let mut fewest_rejected = usize::MAX;
    for format in DATE_FORMATS {
        let mut rejected = 0;
        let values: Vec<Option<NaiveDate>> = cells
            .iter()
            .map(|cell| {
                if cell.is_blank() {
                    return None;
                }
                let parsed = format.parse_cell(cell);
                if parsed.is_none() {
                    rejected += 1;
                }
                parsed
            })
            .collect();
        if rejected == 0 {
            return DateColumnParse::Parsed { format, values };
        }
        fewest_rejected = fewest_rejected.min(rejected);
    }
    DateColumnParse::Unparseable {
        rejected: fewest_rejected,
    }
}
