//! Facebook Marketing API campaign insights.

use serde::Deserialize;

use adkpi_model::{CellValue, RawColumn, RawTable};

use super::{PLATFORM_COLUMN, Platform, flexible_number, number_cells};
use crate::error::Result;

/// Action type counted as a conversion.
const CONVERSION_ACTION: &str = "lead";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacebookAction {
    pub action_type: String,
    #[serde(default, deserialize_with = "flexible_number")]
    pub value: Option<f64>,
}

/// One campaign-level insight row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacebookInsight {
    pub campaign_name: String,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub spend: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub impressions: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub clicks: Option<f64>,
    /// Click-through rate in percent.
    #[serde(default, deserialize_with = "flexible_number")]
    pub ctr: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub cpc: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub cpm: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub frequency: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub reach: Option<f64>,
    #[serde(default)]
    pub actions: Vec<FacebookAction>,
}

impl FacebookInsight {
    /// Value of the first `lead` action, if any.
    pub fn conversions(&self) -> Option<f64> {
        self.actions
            .iter()
            .find(|action| action.action_type == CONVERSION_ACTION)
            .and_then(|action| action.value)
    }
}

/// Converts insight rows into a raw table with canonical column names.
///
/// The `date` column is only emitted when some row carries `date_start`.
pub fn facebook_insights_to_table(insights: &[FacebookInsight]) -> Result<RawTable> {
    let mut columns = vec![
        RawColumn::new(
            PLATFORM_COLUMN,
            vec![CellValue::text(Platform::Facebook.label()); insights.len()],
        ),
        RawColumn::new(
            "campaign",
            insights
                .iter()
                .map(|i| CellValue::text(i.campaign_name.as_str()))
                .collect(),
        ),
    ];
    if insights.iter().any(|i| i.date_start.is_some()) {
        columns.push(RawColumn::new(
            "date",
            insights
                .iter()
                .map(|i| CellValue::from(i.date_start.clone()))
                .collect(),
        ));
    }
    columns.extend([
        RawColumn::new("cost", number_cells(insights, |i| i.spend)),
        RawColumn::new("impressions", number_cells(insights, |i| i.impressions)),
        RawColumn::new("clicks", number_cells(insights, |i| i.clicks)),
        RawColumn::new("conversions", number_cells(insights, FacebookInsight::conversions)),
        RawColumn::new("ctr", number_cells(insights, |i| i.ctr)),
        RawColumn::new("cpc", number_cells(insights, |i| i.cpc)),
        RawColumn::new("cpm", number_cells(insights, |i| i.cpm)),
        RawColumn::new("frequency", number_cells(insights, |i| i.frequency)),
        RawColumn::new("reach", number_cells(insights, |i| i.reach)),
    ]);
    Ok(RawTable::from_columns(columns)?)
}
