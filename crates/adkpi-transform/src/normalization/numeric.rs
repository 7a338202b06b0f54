//! Locale-aware numeric normalization.
//!
//! Money, counts and percentages arrive as typed numbers or as text such as
//! `"R$ 1.234,56"`, `"12,5"` or `"45,2%"`. Parsing never fails: unrecoverable
//! input becomes 0, and [`NumericParse`] tells blank cells apart from cells
//! that had content but could not be read.

use std::sync::LazyLock;

use regex::Regex;

use adkpi_model::{CellValue, NumberLocale};

/// First signed decimal token in the cleaned text.
static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d*\.?\d+").expect("Invalid numeric token regex"));

/// Text values treated as an empty cell.
const BLANK_MARKERS: &[&str] = &["", "nan", "none", "-"];

/// Outcome of parsing one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericParse {
    Parsed(f64),
    /// Missing, empty or a null marker.
    Blank,
    /// Had content, but no finite number could be read from it.
    Unparseable,
}

impl NumericParse {
    /// The canonical value: parsed numbers as-is, everything else 0.
    pub fn value(self) -> f64 {
        match self {
            Self::Parsed(value) => value,
            Self::Blank | Self::Unparseable => 0.0,
        }
    }

    pub fn is_unparseable(self) -> bool {
        matches!(self, Self::Unparseable)
    }
}

/// Normalizes a raw cell with the default (Brazilian) separator convention.
pub fn normalize_numeric(raw: &CellValue) -> f64 {
    parse_numeric(raw, NumberLocale::default()).value()
}

pub fn normalize_numeric_with(raw: &CellValue, locale: NumberLocale) -> f64 {
    parse_numeric(raw, locale).value()
}

/// Normalizes a percentage cell to a fraction: `"45,2%"` becomes 0.452.
pub fn normalize_numeric_percentage(raw: &CellValue) -> f64 {
    parse_percentage(raw, NumberLocale::default()).value()
}

pub fn normalize_numeric_percentage_with(raw: &CellValue, locale: NumberLocale) -> f64 {
    parse_percentage(raw, locale).value()
}

/// Parses a cell, reporting whether it was blank or unreadable.
pub fn parse_numeric(raw: &CellValue, locale: NumberLocale) -> NumericParse {
    match raw {
        CellValue::Missing => NumericParse::Blank,
        CellValue::Number(value) if value.is_nan() => NumericParse::Blank,
        CellValue::Number(value) if value.is_finite() => NumericParse::Parsed(*value),
        CellValue::Number(_) | CellValue::Date(_) => NumericParse::Unparseable,
        CellValue::Text(text) => parse_numeric_text(text, locale),
    }
}

/// Percentage variant of [`parse_numeric`]: sources write percentages in
/// percent, so every parsed value (text or typed) is divided by 100.
pub fn parse_percentage(raw: &CellValue, locale: NumberLocale) -> NumericParse {
    match parse_numeric(raw, locale) {
        NumericParse::Parsed(value) => NumericParse::Parsed(value / 100.0),
        outcome => outcome,
    }
}

fn parse_numeric_text(text: &str, locale: NumberLocale) -> NumericParse {
    let trimmed = text.trim();
    if BLANK_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return NumericParse::Blank;
    }

    let stripped = trimmed.replace("R$", "").replace('%', "");
    let cleaned = resolve_separators(stripped.trim(), locale);

    let Some(token) = NUMERIC_TOKEN.find(&cleaned) else {
        return NumericParse::Unparseable;
    };
    match token.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() => NumericParse::Parsed(value),
        _ => NumericParse::Unparseable,
    }
}

/// Rewrites the string so that `.` is the only decimal mark and thousands
/// separators are gone.
fn resolve_separators(text: &str, locale: NumberLocale) -> String {
    let has_dot = text.contains('.');
    let has_comma = text.contains(',');
    match locale {
        NumberLocale::Brazilian => {
            if has_dot && has_comma {
                text.replace('.', "").replace(',', ".")
            } else if has_comma {
                text.replace(',', ".")
            } else {
                text.to_string()
            }
        }
        NumberLocale::English => text.replace(',', ""),
        NumberLocale::Auto => resolve_separators_auto(text, has_dot, has_comma),
    }
}

fn resolve_separators_auto(text: &str, has_dot: bool, has_comma: bool) -> String {
    if has_dot && has_comma {
        let last_dot = text.rfind('.').unwrap_or(0);
        let last_comma = text.rfind(',').unwrap_or(0);
        return if last_comma > last_dot {
            text.replace('.', "").replace(',', ".")
        } else {
            text.replace(',', "")
        };
    }
    if has_comma {
        return if looks_like_grouping(text, ',') {
            text.replace(',', "")
        } else {
            text.replace(',', ".")
        };
    }
    if has_dot && looks_like_grouping(text, '.') {
        return text.replace('.', "");
    }
    text.to_string()
}

/// A separator is grouping when it repeats, or appears once followed by
/// exactly three digits.
fn looks_like_grouping(text: &str, separator: char) -> bool {
    let parts: Vec<&str> = text.split(separator).collect();
    if parts.len() > 2 {
        return true;
    }
    let Some(tail) = parts.get(1) else {
        return false;
    };
    let digits = tail.chars().take_while(char::is_ascii_digit).count();
    separator == ',' && digits == 3
}
