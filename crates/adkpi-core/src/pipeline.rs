//! End-to-end pipeline: raw table to normalized table, diagnostics and KPIs.

use serde::Serialize;
use tracing::info_span;

use adkpi_map::HeaderAliases;
use adkpi_model::{Diagnostics, KpiSet, NormalizationOptions, NormalizedTable, RawTable};
use adkpi_transform::TableNormalizer;

use crate::aggregator::aggregate;
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub table: NormalizedTable,
    pub diagnostics: Diagnostics,
    pub kpis: KpiSet,
}

/// Normalizes `raw` and aggregates its KPIs.
///
/// Fails only on structural problems (no campaign column, rejected header
/// collision); data problems are reported in `diagnostics`.
pub fn run_pipeline(
    raw: &RawTable,
    aliases: &HeaderAliases,
    options: NormalizationOptions,
) -> Result<PipelineOutput> {
    let span = info_span!("pipeline", rows = raw.row_count(), columns = raw.column_count());
    let _guard = span.enter();

    let (table, diagnostics) = TableNormalizer::with_options(aliases, options).normalize(raw)?;
    let kpis = aggregate(&table)?;
    Ok(PipelineOutput {
        table,
        diagnostics,
        kpis,
    })
}
