//! Whole-table normalization.
//!
//! Renames headers, coerces every canonical column to its type, injects
//! zero-filled columns for absent numeric fields and keeps unmapped columns
//! as passthrough text. Data problems are recorded as diagnostics; only a
//! missing `campaign` column is an error.

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use adkpi_map::{ColumnMapper, HeaderAliases, MappingResult};
use adkpi_model::{
    CANONICAL_SCHEMA, CanonicalField, CellValue, ColumnData, ColumnOrigin, DateColumn,
    Diagnostic, Diagnostics, FieldKind, NormalizationOptions, NormalizedColumn, NormalizedTable,
    NumberLocale, RawTable,
};

use crate::error::NormalizeError;
use crate::normalization::datetime::{DateColumnParse, normalize_date_column};
use crate::normalization::numeric::{parse_numeric, parse_percentage};

/// Normalizes raw tables against one alias table and option set.
#[derive(Debug, Clone, Copy)]
pub struct TableNormalizer<'a> {
    mapper: ColumnMapper<'a>,
    options: NormalizationOptions,
}

impl<'a> TableNormalizer<'a> {
    pub fn new(aliases: &'a HeaderAliases) -> Self {
        Self::with_options(aliases, NormalizationOptions::default())
    }

    pub fn with_options(aliases: &'a HeaderAliases, options: NormalizationOptions) -> Self {
        Self {
            mapper: ColumnMapper::with_options(aliases, &options),
            options,
        }
    }

    pub fn options(&self) -> &NormalizationOptions {
        &self.options
    }

    /// Produces the canonical table and the advisory diagnostics for `raw`.
    ///
    /// Column order: canonical fields in schema order, then unmapped source
    /// columns in source order. The row count is preserved.
    pub fn normalize(
        &self,
        raw: &RawTable,
    ) -> Result<(NormalizedTable, Diagnostics), NormalizeError> {
        let span = info_span!(
            "normalize",
            rows = raw.row_count(),
            columns = raw.column_count()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let headers = raw.headers();
        let mapping = self.mapper.map_headers(&headers)?;
        if mapping.source_position(CanonicalField::Campaign).is_none() {
            return Err(NormalizeError::MissingCampaign { headers });
        }

        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(mapping.diagnostics());

        let mut table = NormalizedTable::new(raw.row_count());
        for field in CANONICAL_SCHEMA {
            let cells = mapping
                .source_position(field)
                .map(|position| raw.columns()[position].cells.as_slice());
            if let Some(column) =
                self.canonical_column(field, cells, raw.row_count(), &mut diagnostics)
            {
                table.push_column(column)?;
            }
        }
        for column in passthrough_columns(raw, &mapping) {
            table.push_column(column)?;
        }

        for diagnostic in &diagnostics {
            warn!(kind = ?diagnostic.kind, column = %diagnostic.column, "{}", diagnostic.message);
        }
        info!(
            rows = table.row_count(),
            columns = table.columns().len(),
            diagnostics = diagnostics.len(),
            duration_ms = start.elapsed().as_millis(),
            "normalization complete"
        );
        Ok((table, diagnostics))
    }

    /// Builds the column for one canonical field. Absent text and date fields
    /// yield `None`; absent numeric fields are zero-filled.
    fn canonical_column(
        &self,
        field: CanonicalField,
        cells: Option<&[CellValue]>,
        row_count: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<NormalizedColumn> {
        let name = field.as_str().to_string();
        let Some(cells) = cells else {
            if !field.is_numeric() {
                return None;
            }
            debug!(field = %field, "field absent, injecting zeros");
            diagnostics.push(Diagnostic::field_defaulted(field.as_str()));
            return Some(NormalizedColumn {
                name,
                field: Some(field),
                origin: ColumnOrigin::Defaulted,
                data: ColumnData::Numeric(vec![0.0; row_count]),
            });
        };

        let data = match field.kind() {
            FieldKind::Key | FieldKind::Text => ColumnData::Text(to_text(cells)),
            FieldKind::Date => ColumnData::Date(date_column(field, cells, diagnostics)),
            FieldKind::Numeric | FieldKind::Percentage => {
                let percentage = field.kind() == FieldKind::Percentage;
                let (values, rejected) =
                    numeric_column(cells, self.options.number_locale, percentage);
                debug!(field = %field, rejected, "numeric column normalized");
                if rejected > 0 {
                    diagnostics.push(Diagnostic::values_defaulted(field.as_str(), rejected));
                }
                ColumnData::Numeric(values)
            }
        };
        Some(NormalizedColumn {
            name,
            field: Some(field),
            origin: ColumnOrigin::Source,
            data,
        })
    }
}

/// Coerces numeric cells, returning the values and how many had to be zeroed.
fn numeric_column(cells: &[CellValue], locale: NumberLocale, percentage: bool) -> (Vec<f64>, usize) {
    let mut rejected = 0;
    let values = cells
        .iter()
        .map(|cell| {
            let outcome = if percentage {
                parse_percentage(cell, locale)
            } else {
                parse_numeric(cell, locale)
            };
            if outcome.is_unparseable() {
                rejected += 1;
            }
            outcome.value()
        })
        .collect();
    (values, rejected)
}

fn date_column(
    field: CanonicalField,
    cells: &[CellValue],
    diagnostics: &mut Diagnostics,
) -> DateColumn {
    match normalize_date_column(cells) {
        DateColumnParse::Parsed { format, values } => {
            debug!(field = %field, format = ?format, "date column parsed");
            DateColumn::Parsed(values)
        }
        DateColumnParse::Empty => {
            diagnostics.push(Diagnostic::date_empty(field.as_str()));
            DateColumn::Missing
        }
        DateColumnParse::Unparseable { rejected } => {
            diagnostics.push(Diagnostic::date_unparseable(field.as_str(), rejected));
            DateColumn::Missing
        }
    }
}

fn to_text(cells: &[CellValue]) -> Vec<Option<String>> {
    cells.iter().map(CellValue::to_text).collect()
}

/// Unmapped source columns, kept verbatim as text under their original name.
fn passthrough_columns<'r>(
    raw: &'r RawTable,
    mapping: &'r MappingResult,
) -> impl Iterator<Item = NormalizedColumn> + 'r {
    raw.columns()
        .iter()
        .zip(&mapping.targets)
        .filter(|(_, target)| target.is_none())
        .map(|(column, _)| NormalizedColumn {
            name: column.name.clone(),
            field: None,
            origin: ColumnOrigin::Passthrough,
            data: ColumnData::Text(
                column.cells.iter().map(CellValue::to_verbatim_text).collect(),
            ),
        })
}

#[cfg(test)]
mod tests {
    use adkpi_model::{DiagnosticKind, RawColumn};

    use super::*;

    fn raw(columns: Vec<(&str, Vec<CellValue>)>) -> RawTable {
        RawTable::from_columns(
            columns
                .into_iter()
                .map(|(name, cells)| RawColumn::new(name, cells))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn missing_campaign_is_structural_error() {
        let table = raw(vec![("Custo", vec![CellValue::text("1")])]);
        let err = TableNormalizer::new(HeaderAliases::builtin())
            .normalize(&table)
            .unwrap_err();
        assert!(matches!(err, NormalizeError::MissingCampaign { .. }));
        assert_eq!(err.to_string(), "no campaign column found (headers: Custo)");
    }

    #[test]
    fn absent_numeric_fields_are_zero_filled() {
        let table = raw(vec![
            ("Campanha", vec![CellValue::text("A"), CellValue::text("B")]),
            ("Cliques", vec![CellValue::text("3"), CellValue::text("x")]),
        ]);
        let (normalized, diagnostics) = TableNormalizer::new(HeaderAliases::builtin())
            .normalize(&table)
            .unwrap();

        for field in CanonicalField::numeric_fields() {
            let values = normalized.numeric(field).unwrap();
            assert_eq!(values.len(), 2);
            assert!(values.iter().all(|v| v.is_finite()));
        }
        assert_eq!(normalized.numeric(CanonicalField::Clicks), Some(&[3.0, 0.0][..]));
        assert!(normalized.has_source_field(CanonicalField::Clicks));
        assert!(!normalized.has_source_field(CanonicalField::Conversions));
        assert!(normalized.dates().is_none());

        let defaulted: Vec<&str> = diagnostics
            .of_kind(DiagnosticKind::FieldDefaulted)
            .map(|d| d.column.as_str())
            .collect();
        assert_eq!(defaulted.len(), CanonicalField::numeric_fields().count() - 1);
        assert!(defaulted.contains(&"conversions"));

        let rejected: Vec<_> = diagnostics.of_kind(DiagnosticKind::ValuesDefaulted).collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].count, Some(1));
    }

    #[test]
    fn unparseable_dates_mark_column_missing() {
        let table = raw(vec![
            ("campaign", vec![CellValue::text("A"), CellValue::text("A")]),
            ("date", vec![CellValue::text("2024-01-01"), CellValue::text("ontem")]),
        ]);
        let (normalized, diagnostics) = TableNormalizer::new(HeaderAliases::builtin())
            .normalize(&table)
            .unwrap();
        assert_eq!(normalized.dates(), Some(&DateColumn::Missing));
        assert_eq!(
            diagnostics
                .of_kind(DiagnosticKind::DateColumnUnparseable)
                .count(),
            1
        );
    }
}
