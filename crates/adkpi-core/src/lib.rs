//! KPI aggregation for normalized campaign tables.
//!
//! - **aggregator**: the campaign-grouped KPI set with zero-guarded ratios
//! - **breakdown**: per-group sums for any text column
//! - **series**: daily series and date-range filtering
//! - **format**: KPI card display strings
//! - **pipeline**: normalization followed by aggregation

pub mod aggregator;
pub mod breakdown;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod series;
pub mod totals;

pub use aggregator::{add_rate_kpis, aggregate, group_kpis, guarded_ratio, headline_kpis};
pub use breakdown::breakdown_by;
pub use error::{KpiError, Result};
pub use format::{format_currency, format_kpi, format_number, format_percentage, format_roas};
pub use pipeline::{PipelineOutput, run_pipeline};
pub use series::{daily_series, filter_by_date};
pub use totals::{GroupTotals, Totals};
