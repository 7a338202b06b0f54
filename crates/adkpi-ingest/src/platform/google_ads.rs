//! Google Ads search results (`campaign` with `metrics` and `segments`).

use serde::Deserialize;

use adkpi_model::{CellValue, RawColumn, RawTable};

use super::{PLATFORM_COLUMN, Platform, flexible_number, number_cells};
use crate::error::Result;

const MICROS_PER_UNIT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GoogleAdsCampaign {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsMetrics {
    #[serde(default, deserialize_with = "flexible_number")]
    pub impressions: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub clicks: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub cost_micros: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub conversions: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub conversions_value: Option<f64>,
    /// Micros.
    #[serde(default, deserialize_with = "flexible_number")]
    pub average_cpc: Option<f64>,
    /// Micros.
    #[serde(default, deserialize_with = "flexible_number")]
    pub average_cpm: Option<f64>,
    /// A fraction, unlike the percent the other sources report.
    #[serde(default, deserialize_with = "flexible_number")]
    pub ctr: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GoogleAdsSegments {
    #[serde(default)]
    pub date: Option<String>,
}

/// One campaign row of a search response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleAdsRow {
    pub campaign: GoogleAdsCampaign,
    #[serde(default)]
    pub metrics: GoogleAdsMetrics,
    #[serde(default)]
    pub segments: GoogleAdsSegments,
}

fn from_micros(value: Option<f64>) -> Option<f64> {
    value.map(|micros| micros / MICROS_PER_UNIT)
}

/// Converts search rows into a raw table with canonical column names and
/// money in currency units.
pub fn google_ads_rows_to_table(rows: &[GoogleAdsRow]) -> Result<RawTable> {
    let mut columns = vec![
        RawColumn::new(
            PLATFORM_COLUMN,
            vec![CellValue::text(Platform::GoogleAds.label()); rows.len()],
        ),
        RawColumn::new(
            "campaign",
            rows.iter()
                .map(|r| CellValue::text(r.campaign.name.as_str()))
                .collect(),
        ),
    ];
    if rows.iter().any(|r| r.segments.date.is_some()) {
        columns.push(RawColumn::new(
            "date",
            rows.iter()
                .map(|r| CellValue::from(r.segments.date.clone()))
                .collect(),
        ));
    }
    columns.extend([
        RawColumn::new("cost", number_cells(rows, |r| from_micros(r.metrics.cost_micros))),
        RawColumn::new("impressions", number_cells(rows, |r| r.metrics.impressions)),
        RawColumn::new("clicks", number_cells(rows, |r| r.metrics.clicks)),
        RawColumn::new("conversions", number_cells(rows, |r| r.metrics.conversions)),
        RawColumn::new(
            "conversion_value",
            number_cells(rows, |r| r.metrics.conversions_value),
        ),
        RawColumn::new("ctr", number_cells(rows, |r| r.metrics.ctr.map(|v| v * 100.0))),
        RawColumn::new("cpc", number_cells(rows, |r| from_micros(r.metrics.average_cpc))),
        RawColumn::new("cpm", number_cells(rows, |r| from_micros(r.metrics.average_cpm))),
    ]);
    Ok(RawTable::from_columns(columns)?)
}
