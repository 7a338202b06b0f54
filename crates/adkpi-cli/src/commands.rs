use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use adkpi_cli::input::{load_aliases, load_raw_table};
use adkpi_core::{aggregate, breakdown_by, daily_series, filter_by_date, group_kpis};
use adkpi_map::HeaderAliases;
use adkpi_model::{Diagnostics, NormalizedTable};
use adkpi_transform::TableNormalizer;

use crate::cli::{AliasesArgs, InputArgs, KpisArgs, NormalizeArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{Breakdown, DailySeries, GroupSummary, KpisReport, NormalizeReport};

pub fn run_aliases(args: &AliasesArgs) -> Result<()> {
    let aliases = load_aliases(args.aliases.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Header"), header_cell("Field")]);
    apply_table_style(&mut table);
    for (header, field) in aliases.entries() {
        table.add_row(vec![header.to_string(), field.to_string()]);
    }
    println!("{table}");
    println!(
        "{} aliases for {} fields",
        aliases.len(),
        HeaderAliases::canonical_names().count()
    );
    Ok(())
}

pub fn run_kpis(args: &KpisArgs) -> Result<KpisReport> {
    let input = &args.input;
    let span = info_span!("kpis", file = %input.file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let (table, diagnostics) = normalize_input(input)?;
    let table = if args.from.is_some() || args.to.is_some() {
        filter_by_date(&table, args.from, args.to).context("filter by date")?
    } else {
        table
    };
    let kpis = aggregate(&table).context("aggregate")?;

    let breakdown = match &args.by {
        Some(key) => {
            let groups = breakdown_by(&table, key)
                .with_context(|| format!("break down by `{key}`"))?
                .iter()
                .map(|group| GroupSummary {
                    group: group.group.clone(),
                    rows: group.rows,
                    kpis: group_kpis(group),
                })
                .collect();
            Some(Breakdown {
                key: key.clone(),
                groups,
            })
        }
        None => None,
    };
    let daily = match args.daily {
        Some(field) => Some(DailySeries {
            field,
            points: daily_series(&table, field)
                .with_context(|| format!("daily series of `{field}`"))?,
        }),
        None => None,
    };

    info!(
        rows = table.row_count(),
        diagnostics = diagnostics.len(),
        duration_ms = start.elapsed().as_millis(),
        "kpis complete"
    );
    Ok(KpisReport {
        source: input.file.clone(),
        rows: table.row_count(),
        kpis,
        breakdown,
        daily,
        diagnostics,
    })
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<NormalizeReport> {
    let span = info_span!("normalize", file = %args.input.file.display());
    let _guard = span.enter();

    let (table, diagnostics) = normalize_input(&args.input)?;
    Ok(NormalizeReport {
        source: args.input.file.clone(),
        table,
        diagnostics,
        preview_rows: args.rows,
    })
}

fn normalize_input(input: &InputArgs) -> Result<(NormalizedTable, Diagnostics)> {
    let aliases = load_aliases(input.aliases.as_deref())?;
    let raw = load_raw_table(&input.file, input.source.into(), input.platform.as_deref())?;
    TableNormalizer::with_options(&aliases, input.options())
        .normalize(&raw)
        .with_context(|| format!("normalize {}", input.file.display()))
}
