//! Cell-level normalization for campaign tables.
//!
//! - **numeric**: money, counts and percentages across separator conventions
//! - **datetime**: whole-column calendar date parsing

pub mod datetime;
pub mod numeric;

pub use datetime::{
    DATE_FORMATS, DateColumnParse, DateFormat, normalize_date, normalize_date_column,
};
pub use numeric::{
    NumericParse, normalize_numeric, normalize_numeric_percentage,
    normalize_numeric_percentage_with, normalize_numeric_with, parse_numeric, parse_percentage,
};
