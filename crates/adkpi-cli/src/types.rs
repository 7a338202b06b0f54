use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use adkpi_model::{CanonicalField, Diagnostics, KpiSet, NormalizedTable};

#[derive(Debug, Serialize)]
pub struct KpisReport {
    pub source: PathBuf,
    /// Rows aggregated, after the date filter.
    pub rows: usize,
    pub kpis: KpiSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailySeries>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Serialize)]
pub struct Breakdown {
    pub key: String,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub group: Option<String>,
    pub rows: usize,
    pub kpis: KpiSet,
}

#[derive(Debug, Serialize)]
pub struct DailySeries {
    pub field: CanonicalField,
    pub points: Vec<(NaiveDate, f64)>,
}

#[derive(Debug)]
pub struct NormalizeReport {
    pub source: PathBuf,
    pub table: NormalizedTable,
    pub diagnostics: Diagnostics,
    pub preview_rows: usize,
}
