//! Input loading and option assembly shared by the subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use adkpi_ingest::{Platform, read_delimited, tag_platform};
use adkpi_map::HeaderAliases;
use adkpi_model::RawTable;

/// Shape of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Delimited export (CSV, `;`-separated or TSV).
    #[default]
    Delimited,
    /// Facebook Marketing API insights JSON.
    Facebook,
    /// Google Ads search results JSON.
    GoogleAds,
}

/// Loads `path` as `source`. A `platform` label is added to delimited
/// exports when given; API payloads always carry their own.
pub fn load_raw_table(path: &Path, source: InputSource, platform: Option<&str>) -> Result<RawTable> {
    let table = match source {
        InputSource::Delimited => {
            let table = read_delimited(path)
                .with_context(|| format!("load {}", path.display()))?;
            match platform {
                Some(label) => tag_platform(table, label).context("tag platform")?,
                None => table,
            }
        }
        InputSource::Facebook => load_platform(path, Platform::Facebook)?,
        InputSource::GoogleAds => load_platform(path, Platform::GoogleAds)?,
    };
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "input loaded"
    );
    Ok(table)
}

fn load_platform(path: &Path, platform: Platform) -> Result<RawTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    platform
        .load_json(&text)
        .with_context(|| format!("decode {}", path.display()))
}

/// Built-in aliases, extended with a user TOML file when given.
pub fn load_aliases(path: Option<&Path>) -> Result<HeaderAliases> {
    let builtin = HeaderAliases::builtin();
    match path {
        Some(path) => builtin
            .extend_from_file(path)
            .with_context(|| format!("load aliases from {}", path.display())),
        None => Ok(builtin.clone()),
    }
}
