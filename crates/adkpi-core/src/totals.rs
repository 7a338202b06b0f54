//! Per-group sums of the numeric canonical fields.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;

use adkpi_model::{CanonicalField, NormalizedTable};

use crate::error::{KpiError, Result};

const ROWS: &str = "__rows";

/// Sums of numeric canonical fields. Absent fields read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Totals(BTreeMap<CanonicalField, f64>);

impl Totals {
    pub fn get(&self, field: CanonicalField) -> f64 {
        self.0.get(&field).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, f64)> + '_ {
        self.0.iter().map(|(field, value)| (*field, *value))
    }

    fn add(&mut self, field: CanonicalField, value: f64) {
        *self.0.entry(field).or_default() += value;
    }

    /// Field-wise sum over groups.
    pub fn sum_of(groups: &[GroupTotals]) -> Self {
        let mut totals = Self::default();
        for group in groups {
            for (field, value) in group.totals.iter() {
                totals.add(field, value);
            }
        }
        totals
    }
}

/// One group of a grouped table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotals {
    /// Group key; `None` collects rows with a blank key.
    pub group: Option<String>,
    pub rows: usize,
    pub totals: Totals,
}

/// Groups `table` by the text column `key` and sums every numeric canonical
/// field per group. Groups come out in order of first appearance.
pub(crate) fn group_totals(table: &NormalizedTable, key: &str) -> Result<Vec<GroupTotals>> {
    let keys = table.text(key).ok_or_else(|| KpiError::NotGroupable {
        column: key.to_string(),
    })?;

    let mut columns = vec![Column::new(key.into(), keys)];
    let mut aggs = Vec::new();
    for field in CanonicalField::numeric_fields() {
        if let Some(values) = table.numeric(field) {
            columns.push(Column::new(field.as_str().into(), values));
            aggs.push(col(field.as_str()).sum());
        }
    }
    aggs.push(len().cast(DataType::Int64).alias(ROWS));

    let grouped = DataFrame::new(columns)?
        .lazy()
        .group_by_stable([col(key)])
        .agg(aggs)
        .collect()?;

    let groups: Vec<Option<String>> = grouped
        .column(key)?
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    let rows: Vec<usize> = grouped
        .column(ROWS)?
        .i64()?
        .into_iter()
        .map(|count| count.and_then(|n| usize::try_from(n).ok()).unwrap_or(0))
        .collect();

    let mut out: Vec<GroupTotals> = groups
        .into_iter()
        .zip(rows)
        .map(|(group, rows)| GroupTotals {
            group,
            rows,
            totals: Totals::default(),
        })
        .collect();
    for field in CanonicalField::numeric_fields() {
        let Ok(column) = grouped.column(field.as_str()) else {
            continue;
        };
        for (group, value) in out.iter_mut().zip(column.f64()?) {
            group.totals.add(field, value.unwrap_or(0.0));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use adkpi_model::{ColumnData, ColumnOrigin, NormalizedColumn};

    use super::*;

    fn table() -> NormalizedTable {
        let mut table = NormalizedTable::new(4);
        table
            .push_column(NormalizedColumn {
                name: "campaign".to_string(),
                field: Some(CanonicalField::Campaign),
                origin: ColumnOrigin::Source,
                data: ColumnData::Text(vec![
                    Some("B".to_string()),
                    Some("A".to_string()),
                    None,
                    Some("B".to_string()),
                ]),
            })
            .unwrap();
        table
            .push_column(NormalizedColumn {
                name: "cost".to_string(),
                field: Some(CanonicalField::Cost),
                origin: ColumnOrigin::Source,
                data: ColumnData::Numeric(vec![1.0, 2.0, 4.0, 8.0]),
            })
            .unwrap();
        table
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let groups = group_totals(&table(), "campaign").unwrap();
        let keys: Vec<Option<&str>> = groups.iter().map(|g| g.group.as_deref()).collect();
        assert_eq!(keys, vec![Some("B"), Some("A"), None]);
        assert_eq!(groups[0].rows, 2);
        assert_eq!(groups[0].totals.get(CanonicalField::Cost), 9.0);
        assert_eq!(groups[0].totals.get(CanonicalField::Clicks), 0.0);
        assert_eq!(Totals::sum_of(&groups).get(CanonicalField::Cost), 15.0);
    }

    #[test]
    fn numeric_key_is_rejected() {
        let err = group_totals(&table(), "cost").unwrap_err();
        assert!(matches!(err, KpiError::NotGroupable { .. }));
    }
}
