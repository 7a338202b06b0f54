//! KPI aggregation over a normalized table.
//!
//! Rows are grouped by campaign and summed; the KPI set is derived from the
//! grouped sums. Every division goes through [`guarded_ratio`], so empty or
//! all-zero input yields zeros instead of NaN.

use std::time::Instant;

use tracing::{debug, info, info_span};

use adkpi_model::{CanonicalField, Kpi, KpiSet, NormalizedTable};

use crate::error::{KpiError, Result};
use crate::totals::{GroupTotals, Totals, group_totals};

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Computes the KPI set of `table`, grouped by campaign.
///
/// Average frequency, CPM and cost per conversion are only reported when the
/// source table carried those columns.
pub fn aggregate(table: &NormalizedTable) -> Result<KpiSet> {
    let span = info_span!("aggregate", rows = table.row_count());
    let _guard = span.enter();
    let start = Instant::now();

    if table.campaigns().is_none() {
        return Err(KpiError::MissingCampaign);
    }
    let groups = group_totals(table, CanonicalField::Campaign.as_str())?;
    let totals = Totals::sum_of(&groups);

    let mut kpis = headline_kpis(&totals);
    if table.has_source_field(CanonicalField::Frequency) {
        kpis.insert(
            Kpi::AverageFrequency,
            mean_over_groups(&groups, CanonicalField::Frequency),
        );
    }
    if table.has_source_field(CanonicalField::Cpm) {
        kpis.insert(Kpi::AverageCpm, mean_over_groups(&groups, CanonicalField::Cpm));
    }
    if table.has_source_field(CanonicalField::CostPerConversion)
        && totals.get(CanonicalField::CostPerConversion) > 0.0
    {
        kpis.insert(
            Kpi::AverageCostPerConversion,
            mean_over_groups(&groups, CanonicalField::CostPerConversion),
        );
    }
    add_rate_kpis(&mut kpis, &totals);

    debug!(kpis = kpis.len(), "kpi set derived");
    info!(
        groups = groups.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );
    Ok(kpis)
}

/// KPIs derivable from sums alone, without the supplementary rates.
pub fn headline_kpis(totals: &Totals) -> KpiSet {
    let impressions = totals.get(CanonicalField::Impressions);
    let clicks = totals.get(CanonicalField::Clicks);
    let cost = totals.get(CanonicalField::Cost);

    let mut kpis = KpiSet::new();
    kpis.insert(Kpi::Impressions, impressions);
    kpis.insert(Kpi::Clicks, clicks);
    kpis.insert(Kpi::Ctr, guarded_ratio(clicks, impressions) * 100.0);
    kpis.insert(Kpi::AverageCpc, guarded_ratio(cost, clicks));
    kpis.insert(Kpi::Conversions, totals.get(CanonicalField::Conversions));
    kpis.insert(Kpi::TotalCost, cost);
    kpis.insert(
        Kpi::Roas,
        guarded_ratio(totals.get(CanonicalField::ConversionValue), cost),
    );
    kpis
}

/// Adds conversion rate and cost per acquisition.
pub fn add_rate_kpis(kpis: &mut KpiSet, totals: &Totals) {
    let conversions = totals.get(CanonicalField::Conversions);
    kpis.insert(
        Kpi::ConversionRate,
        guarded_ratio(conversions, totals.get(CanonicalField::Clicks)) * 100.0,
    );
    kpis.insert(
        Kpi::CostPerAcquisition,
        guarded_ratio(totals.get(CanonicalField::Cost), conversions),
    );
}

/// Headline and rate KPIs of a single group.
pub fn group_kpis(group: &GroupTotals) -> KpiSet {
    let mut kpis = headline_kpis(&group.totals);
    add_rate_kpis(&mut kpis, &group.totals);
    kpis
}

fn mean_over_groups(groups: &[GroupTotals], field: CanonicalField) -> f64 {
    let sum: f64 = groups.iter().map(|group| group.totals.get(field)).sum();
    guarded_ratio(sum, groups.len() as f64)
}
