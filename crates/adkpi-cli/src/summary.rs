use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use polars::prelude::AnyValue;

use adkpi_common::{any_to_string, format_numeric};
use adkpi_core::format_kpi;
use adkpi_model::{ColumnOrigin, DiagnosticKind, Diagnostics, Kpi, KpiSet, KpiUnit};
use adkpi_transform::normalized_to_frame;

use crate::types::{Breakdown, DailySeries, KpisReport, NormalizeReport};

pub fn print_kpis(report: &KpisReport) {
    println!("Source: {}", report.source.display());
    println!("Rows: {}", report.rows);
    let mut table = Table::new();
    table.set_header(vec![header_cell("KPI"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (kpi, value) in report.kpis.iter() {
        table.add_row(vec![Cell::new(kpi.label()), kpi_cell(kpi, value)]);
    }
    println!("{table}");
    if let Some(breakdown) = &report.breakdown {
        print_breakdown(breakdown);
    }
    if let Some(daily) = &report.daily {
        print_daily(daily);
    }
    print_diagnostics(&report.diagnostics);
}

fn print_breakdown(breakdown: &Breakdown) {
    let Some(first) = breakdown.groups.first() else {
        return;
    };
    let kpis: Vec<Kpi> = first.kpis.iter().map(|(kpi, _)| kpi).collect();
    let mut table = Table::new();
    let mut header = vec![header_cell(&breakdown.key), header_cell("Rows")];
    header.extend(kpis.iter().map(|kpi| header_cell(kpi.label())));
    table.set_header(header);
    apply_wide_table_style(&mut table);
    for index in 1..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for group in &breakdown.groups {
        let mut row = vec![group_cell(group.group.as_deref()), Cell::new(group.rows)];
        row.extend(kpis.iter().map(|kpi| value_cell(&group.kpis, *kpi)));
        table.add_row(row);
    }
    println!();
    println!("By {}:", breakdown.key);
    println!("{table}");
}

fn print_daily(daily: &DailySeries) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Date"), header_cell(daily.field.as_str())]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (date, value) in &daily.points {
        table.add_row(vec![
            Cell::new(date.format("%Y-%m-%d")),
            Cell::new(format_numeric(*value)),
        ]);
    }
    println!();
    println!("Daily {}:", daily.field);
    println!("{table}");
}

pub fn print_normalized(report: &NormalizeReport) -> polars::prelude::PolarsResult<()> {
    println!("Source: {}", report.source.display());
    println!(
        "Rows: {} (showing {})",
        report.table.row_count(),
        report.preview_rows.min(report.table.row_count())
    );
    let df = normalized_to_frame(&report.table)?.head(Some(report.preview_rows));
    let mut table = Table::new();
    table.set_header(
        df.get_columns()
            .iter()
            .zip(report.table.columns())
            .map(|(column, normalized)| match normalized.origin {
                ColumnOrigin::Source => header_cell(column.name().as_str()),
                ColumnOrigin::Defaulted => dim_cell(column.name().as_str()),
                ColumnOrigin::Passthrough => Cell::new(column.name().as_str()).fg(Color::Yellow),
            })
            .collect::<Vec<_>>(),
    );
    apply_wide_table_style(&mut table);
    for idx in 0..df.height() {
        let row: Vec<Cell> = df
            .get_columns()
            .iter()
            .map(|column| {
                let value = column.get(idx).unwrap_or(AnyValue::Null);
                if value.is_null() {
                    dim_cell("-")
                } else {
                    Cell::new(any_to_string(value))
                }
            })
            .collect();
        table.add_row(row);
    }
    println!("{table}");
    print_diagnostics(&report.diagnostics);
    Ok(())
}

pub fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
        header_cell("Did you mean"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for diagnostic in diagnostics.iter() {
        table.add_row(vec![
            kind_cell(diagnostic.kind),
            Cell::new(&diagnostic.column),
            diagnostic.count.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&diagnostic.message),
            diagnostic
                .suggestion
                .as_deref()
                .map_or_else(|| dim_cell("-"), |s| Cell::new(s).fg(Color::Green)),
        ]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() == 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
        ]);
    }
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kpi_cell(kpi: Kpi, value: f64) -> Cell {
    let cell = Cell::new(format_kpi(kpi, value));
    match kpi.unit() {
        KpiUnit::Currency => cell.fg(Color::Green),
        KpiUnit::Multiple if value < 1.0 => cell.fg(Color::Red),
        _ => cell,
    }
}

fn value_cell(kpis: &KpiSet, kpi: Kpi) -> Cell {
    match kpis.get(kpi) {
        Some(value) => Cell::new(format_kpi(kpi, value)),
        None => dim_cell("-"),
    }
}

fn group_cell(group: Option<&str>) -> Cell {
    match group {
        Some(name) => Cell::new(name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => dim_cell("(none)"),
    }
}

fn kind_cell(kind: DiagnosticKind) -> Cell {
    let (label, color) = match kind {
        DiagnosticKind::UnmappedHeader => ("UNMAPPED", Color::Yellow),
        DiagnosticKind::HeaderCollision => ("COLLISION", Color::Red),
        DiagnosticKind::FieldDefaulted => ("DEFAULTED", Color::DarkGrey),
        DiagnosticKind::ValuesDefaulted => ("ZEROED", Color::Yellow),
        DiagnosticKind::DateColumnUnparseable => ("DATE", Color::Red),
        DiagnosticKind::DateColumnEmpty => ("DATE", Color::DarkGrey),
    };
    Cell::new(label).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
