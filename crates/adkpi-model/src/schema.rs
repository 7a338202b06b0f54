//! The canonical campaign schema every normalized table conforms to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Semantic type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Grouping key; required for aggregation.
    Key,
    /// Calendar date.
    Date,
    /// Money or count; defaults to 0.
    Numeric,
    /// Written as a percentage in sources, stored as a fraction.
    Percentage,
    /// Optional descriptive text.
    Text,
}

/// A field of the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Campaign,
    Date,
    Cost,
    Clicks,
    Impressions,
    Conversions,
    ConversionValue,
    Cpc,
    Cpm,
    Ctr,
    Frequency,
    CostPerConversion,
    Objective,
    CampaignDelivery,
    CampaignBudget,
    CampaignBudgetType,
    ConversionType,
}

/// Canonical fields in schema order.
pub const CANONICAL_SCHEMA: [CanonicalField; 17] = [
    CanonicalField::Campaign,
    CanonicalField::Date,
    CanonicalField::Cost,
    CanonicalField::Clicks,
    CanonicalField::Impressions,
    CanonicalField::Conversions,
    CanonicalField::ConversionValue,
    CanonicalField::Cpc,
    CanonicalField::Cpm,
    CanonicalField::Ctr,
    CanonicalField::Frequency,
    CanonicalField::CostPerConversion,
    CanonicalField::Objective,
    CanonicalField::CampaignDelivery,
    CanonicalField::CampaignBudget,
    CanonicalField::CampaignBudgetType,
    CanonicalField::ConversionType,
];

impl CanonicalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Date => "date",
            Self::Cost => "cost",
            Self::Clicks => "clicks",
            Self::Impressions => "impressions",
            Self::Conversions => "conversions",
            Self::ConversionValue => "conversion_value",
            Self::Cpc => "cpc",
            Self::Cpm => "cpm",
            Self::Ctr => "ctr",
            Self::Frequency => "frequency",
            Self::CostPerConversion => "cost_per_conversion",
            Self::Objective => "objective",
            Self::CampaignDelivery => "campaign_delivery",
            Self::CampaignBudget => "campaign_budget",
            Self::CampaignBudgetType => "campaign_budget_type",
            Self::ConversionType => "conversion_type",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Campaign => FieldKind::Key,
            Self::Date => FieldKind::Date,
            Self::Ctr => FieldKind::Percentage,
            Self::Cost
            | Self::Clicks
            | Self::Impressions
            | Self::Conversions
            | Self::ConversionValue
            | Self::Cpc
            | Self::Cpm
            | Self::Frequency
            | Self::CostPerConversion => FieldKind::Numeric,
            Self::Objective
            | Self::CampaignDelivery
            | Self::CampaignBudget
            | Self::CampaignBudgetType
            | Self::ConversionType => FieldKind::Text,
        }
    }

    /// Numeric and percentage fields; these are always present after normalization.
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind(), FieldKind::Numeric | FieldKind::Percentage)
    }

    /// Iterates the numeric fields in schema order.
    pub fn numeric_fields() -> impl Iterator<Item = CanonicalField> {
        CANONICAL_SCHEMA.into_iter().filter(CanonicalField::is_numeric)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CANONICAL_SCHEMA
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
