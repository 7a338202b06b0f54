//! Aggregate business metrics.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// How a KPI value should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiUnit {
    Count,
    Currency,
    Percentage,
    /// Plain decimal ratio (e.g. frequency).
    Ratio,
    /// Return multiple (e.g. ROAS 2.5x).
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kpi {
    Impressions,
    Clicks,
    Ctr,
    AverageCpc,
    Conversions,
    TotalCost,
    Roas,
    AverageFrequency,
    AverageCpm,
    AverageCostPerConversion,
    ConversionRate,
    CostPerAcquisition,
}

impl Kpi {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Impressions => "Impressions",
            Self::Clicks => "Clicks",
            Self::Ctr => "CTR (%)",
            Self::AverageCpc => "Average CPC",
            Self::Conversions => "Conversions",
            Self::TotalCost => "Total Cost",
            Self::Roas => "ROAS",
            Self::AverageFrequency => "Average Frequency",
            Self::AverageCpm => "Average CPM",
            Self::AverageCostPerConversion => "Average Cost per Conversion",
            Self::ConversionRate => "Conversion Rate (%)",
            Self::CostPerAcquisition => "Cost per Acquisition",
        }
    }

    pub fn unit(&self) -> KpiUnit {
        match self {
            Self::Impressions | Self::Clicks | Self::Conversions => KpiUnit::Count,
            Self::AverageCpc
            | Self::TotalCost
            | Self::AverageCpm
            | Self::AverageCostPerConversion
            | Self::CostPerAcquisition => KpiUnit::Currency,
            Self::Ctr | Self::ConversionRate => KpiUnit::Percentage,
            Self::AverageFrequency => KpiUnit::Ratio,
            Self::Roas => KpiUnit::Multiple,
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// KPI name to value, in insertion order. Serializes as a flat label map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiSet {
    entries: Vec<(Kpi, f64)>,
}

impl KpiSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `kpi`.
    pub fn insert(&mut self, kpi: Kpi, value: f64) {
        match self.entries.iter_mut().find(|(k, _)| *k == kpi) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((kpi, value)),
        }
    }

    pub fn get(&self, kpi: Kpi) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kpi)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, kpi: Kpi) -> bool {
        self.get(kpi).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Kpi, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for KpiSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kpi, value) in &self.entries {
            map.serialize_entry(kpi.label(), value)?;
        }
        map.end()
    }
}
