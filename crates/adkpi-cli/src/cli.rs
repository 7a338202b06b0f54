//! CLI argument definitions for the campaign KPI tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use adkpi_cli::input::InputSource;
use adkpi_model::{CanonicalField, CollisionPolicy, NormalizationOptions, NumberLocale};

#[derive(Parser)]
#[command(
    name = "adkpi",
    version,
    about = "Normalize ad-campaign exports and compute KPIs",
    long_about = "Normalize heterogeneous ad-campaign exports to a canonical schema and\n\
                  compute campaign KPIs (CTR, CPC, ROAS, conversion rate, ...).\n\n\
                  Reads delimited exports as well as Facebook and Google Ads API JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the KPI set of a campaign file.
    Kpis(KpisArgs),

    /// Show the normalized table and its diagnostics.
    Normalize(NormalizeArgs),

    /// List the header aliases in effect.
    Aliases(AliasesArgs),
}

/// Input file and normalization options shared by `kpis` and `normalize`.
#[derive(Args)]
pub struct InputArgs {
    /// Campaign data file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input file shape.
    #[arg(long = "source", value_enum, default_value = "csv")]
    pub source: SourceArg,

    /// Add a `platform` column with this label to a delimited export.
    #[arg(long = "platform", value_name = "NAME")]
    pub platform: Option<String>,

    /// How `.` and `,` are read in numbers.
    #[arg(long = "locale", value_enum, default_value = "brazilian")]
    pub locale: LocaleArg,

    /// Fail when two columns map to the same field instead of keeping the last.
    #[arg(long = "reject-collisions")]
    pub reject_collisions: bool,

    /// TOML file with extra header aliases (`[aliases] "header" = "field"`).
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,
}

impl InputArgs {
    pub fn options(&self) -> NormalizationOptions {
        NormalizationOptions::new()
            .with_number_locale(self.locale.into())
            .with_collision_policy(if self.reject_collisions {
                CollisionPolicy::Reject
            } else {
                CollisionPolicy::LastWins
            })
    }
}

#[derive(Args)]
pub struct KpisArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// First day to include (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Also show per-group KPIs for this text column (e.g. campaign, platform).
    #[arg(long = "by", value_name = "COLUMN")]
    pub by: Option<String>,

    /// Also show the per-day sums of this numeric field.
    #[arg(long = "daily", value_name = "FIELD")]
    pub daily: Option<CanonicalField>,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of rows to preview.
    #[arg(long = "rows", default_value_t = 20)]
    pub rows: usize,
}

#[derive(Args)]
pub struct AliasesArgs {
    /// TOML file with extra header aliases.
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Csv,
    Facebook,
    Google,
}

impl From<SourceArg> for InputSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::Csv => InputSource::Delimited,
            SourceArg::Facebook => InputSource::Facebook,
            SourceArg::Google => InputSource::GoogleAds,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LocaleArg {
    /// `1.234,56`
    Brazilian,
    /// `1,234.56`
    English,
    /// Guess per cell.
    Auto,
}

impl From<LocaleArg> for NumberLocale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::Brazilian => NumberLocale::Brazilian,
            LocaleArg::English => NumberLocale::English,
            LocaleArg::Auto => NumberLocale::Auto,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
