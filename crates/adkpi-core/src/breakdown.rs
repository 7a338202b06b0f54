//! Per-group breakdowns (campaign distribution, platform comparison).

use tracing::debug;

use adkpi_model::NormalizedTable;

use crate::error::Result;
use crate::totals::{GroupTotals, group_totals};

/// Sums every numeric canonical field per value of the text column `key`.
///
/// `key` may be `campaign`, a canonical text field or any passthrough column
/// such as `platform`. Groups are ordered by first appearance; blank keys
/// form their own group.
pub fn breakdown_by(table: &NormalizedTable, key: &str) -> Result<Vec<GroupTotals>> {
    let groups = group_totals(table, key)?;
    debug!(key, groups = groups.len(), "breakdown computed");
    Ok(groups)
}
