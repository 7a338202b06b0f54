//! Ad-platform API records.
//!
//! Typed views of the JSON returned by the Facebook Marketing API insights
//! endpoint and the Google Ads search endpoint, converted into raw tables in
//! canonical units: money in currency units, `ctr` in percent like every
//! other percentage source. Numbers are emitted as typed cells.

use serde::{Deserialize, Deserializer};

use adkpi_model::{CellValue, RawColumn, RawTable};

use crate::error::{IngestError, Result};

pub mod facebook;
pub mod google_ads;

pub use facebook::{FacebookAction, FacebookInsight, facebook_insights_to_table};
pub use google_ads::{GoogleAdsRow, google_ads_rows_to_table};

/// Name of the passthrough column identifying the source platform.
pub const PLATFORM_COLUMN: &str = "platform";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    GoogleAds,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::GoogleAds => "Google",
        }
    }

    /// Decodes an API payload and converts it into a raw table.
    pub fn load_json(self, text: &str) -> Result<RawTable> {
        let decode = |source| IngestError::Decode {
            platform: self.label(),
            source,
        };
        match self {
            Self::Facebook => {
                let payload: Payload<FacebookInsight> =
                    serde_json::from_str(text).map_err(decode)?;
                facebook_insights_to_table(&payload.into_records())
            }
            Self::GoogleAds => {
                let payload: Payload<GoogleAdsRow> = serde_json::from_str(text).map_err(decode)?;
                google_ads_rows_to_table(&payload.into_records())
            }
        }
    }
}

/// Bare record arrays or the wrapped forms the APIs return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    List(Vec<T>),
    Data { data: Vec<T> },
    Results { results: Vec<T> },
}

impl<T> Payload<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Self::List(records) | Self::Data { data: records } | Self::Results { results: records } => {
                records
            }
        }
    }
}

/// Appends a constant `platform` column, e.g. for a CSV export whose origin
/// is known. An existing column of that name is replaced.
pub fn tag_platform(table: RawTable, platform: &str) -> Result<RawTable> {
    let row_count = table.row_count();
    let mut columns: Vec<RawColumn> = table
        .into_columns()
        .into_iter()
        .filter(|column| column.name != PLATFORM_COLUMN)
        .collect();
    columns.push(RawColumn::new(
        PLATFORM_COLUMN,
        vec![CellValue::text(platform); row_count],
    ));
    Ok(RawTable::from_columns(columns)?)
}

/// APIs send int64 and money fields as strings; accept either form.
pub(crate) fn flexible_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got `{text}`"))),
    }
}

pub(crate) fn number_cells<T>(records: &[T], value: impl Fn(&T) -> Option<f64>) -> Vec<CellValue> {
    records.iter().map(|record| value(record).into()).collect()
}
