//! CLI entry point for dataset overview, quality checks and EDA reports.

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eda_quality::{
    CategoryRankerConfig, DataProfiler, EdaError, IdColumnPolicy, QualityAnalyzer, QualityConfig,
    QualityConfigBuilder, QualityFlags, ReadinessCriteria, ReadinessVerdict, ReportGenerator,
    ReportSettings, Table, assess_readiness, flatten_summary, ingest, missing_table,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI-compatible identifier column policy
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliIdPolicy {
    /// `id` or any name ending in `_id`
    ExactOrSuffix,
    /// Only a column named `id`
    Exact,
    /// Only names ending in `_id`
    Suffix,
}

impl From<CliIdPolicy> for IdColumnPolicy {
    fn from(cli: CliIdPolicy) -> Self {
        match cli {
            CliIdPolicy::ExactOrSuffix => IdColumnPolicy::ExactOrSuffix,
            CliIdPolicy::Exact => IdColumnPolicy::ExactOnly,
            CliIdPolicy::Suffix => IdColumnPolicy::SuffixOnly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "eda-quality",
    version,
    about = "Exploratory data analysis and data quality checks for CSV files",
    long_about = "Summarizes a CSV dataset, flags data quality problems and writes EDA reports.\n\n\
                  EXAMPLES:\n  \
                  # Shape and per-column summary\n  \
                  eda-quality overview data.csv\n\n  \
                  # Quality flags as JSON\n  \
                  eda-quality quality data.csv --json\n\n  \
                  # Full report with a custom title\n  \
                  eda-quality report data.csv --out-dir reports --title \"Train set\""
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// JSON file with quality thresholds, penalty weights and id policy
    ///
    /// Missing fields keep their defaults. Flags override file values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dataset shape and a per-column summary
    Overview {
        /// Path to the CSV file
        csv: PathBuf,

        /// Output JSON to stdout instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print quality flags, the quality score and the readiness verdict
    Quality {
        /// Path to the CSV file
        csv: PathBuf,

        /// Skip checks that need the raw rows
        #[arg(long)]
        stats_only: bool,

        /// Output JSON to stdout instead of human-readable text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Build a full EDA report and write it to a directory
    Report {
        /// Path to the CSV file
        csv: PathBuf,

        /// Output directory for report files
        #[arg(long, default_value = "reports")]
        out_dir: PathBuf,

        /// Report title
        #[arg(long, default_value = "EDA report")]
        title: String,

        /// Most frequent values listed per categorical column
        #[arg(long, default_value_t = 5)]
        top_k_categories: usize,

        /// Maximum number of categorical columns to rank
        #[arg(long, default_value_t = 5)]
        max_cat_columns: usize,

        /// Columns at or above this missing share are listed as problems
        #[arg(long, default_value_t = 0.1)]
        min_missing_share: f64,

        /// Skip checks that need the raw rows
        #[arg(long)]
        stats_only: bool,

        /// Also print the report as JSON to stdout
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
}

impl Command {
    fn json(&self) -> bool {
        match self {
            Command::Overview { json, .. }
            | Command::Quality { json, .. }
            | Command::Report { json, .. } => *json,
        }
    }
}

/// Overrides for the quality thresholds and readiness criteria.
#[derive(Args, Debug)]
struct ThresholdArgs {
    /// Fewer rows set `too_few_rows`
    #[arg(long)]
    min_rows: Option<usize>,

    /// More columns set `too_many_columns`
    #[arg(long)]
    max_columns: Option<usize>,

    /// A column missing more than this share sets `too_many_missing`
    #[arg(long)]
    max_missing_share: Option<f64>,

    /// Distinct values above which a categorical column is high-cardinality
    #[arg(long)]
    high_cardinality: Option<usize>,

    /// Identifier columns with a lower unique ratio are suspicious
    #[arg(long)]
    id_unique_ratio: Option<f64>,

    /// A numeric column with a larger zero share sets `has_many_zero_values`
    #[arg(long)]
    zero_share: Option<f64>,

    /// Which column names count as identifiers
    #[arg(long, value_enum)]
    id_policy: Option<CliIdPolicy>,

    /// Minimum rows for `ok_for_model`
    #[arg(long, default_value_t = 50)]
    ready_min_rows: usize,

    /// The largest missing share must stay below this for `ok_for_model`
    #[arg(long, default_value_t = 0.5)]
    ready_max_missing_share: f64,
}

impl ThresholdArgs {
    fn readiness(&self) -> ReadinessCriteria {
        ReadinessCriteria {
            min_rows: self.ready_min_rows,
            max_missing_share: self.ready_max_missing_share,
        }
    }
}

/// Flags and verdict printed by `quality --json`.
#[derive(Serialize)]
struct QualityOutput<'a> {
    input_file: String,
    n_rows: usize,
    n_cols: usize,
    flags: &'a QualityFlags,
    readiness: &'a ReadinessVerdict,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.quiet, cli.command.json());

    match &cli.command {
        Command::Overview { csv, json } => run_overview(csv, *json),
        Command::Quality {
            csv,
            stats_only,
            json,
            thresholds,
        } => {
            let config = load_quality_config(cli.config.as_deref(), thresholds)?;
            run_quality(csv, &config, &thresholds.readiness(), *stats_only, *json)
        }
        Command::Report {
            csv,
            out_dir,
            title,
            top_k_categories,
            max_cat_columns,
            min_missing_share,
            stats_only,
            json,
            thresholds,
        } => {
            let settings = ReportSettings {
                title: title.clone(),
                min_missing_share: *min_missing_share,
                stats_only: *stats_only,
                categories: CategoryRankerConfig {
                    max_columns: *max_cat_columns,
                    top_k: *top_k_categories,
                },
                readiness: thresholds.readiness(),
                quality: load_quality_config(cli.config.as_deref(), thresholds)?,
            };
            run_report(csv, out_dir, settings, *json)
        }
    }
}

/// Merge the optional config file with command-line overrides.
fn load_quality_config(path: Option<&Path>, args: &ThresholdArgs) -> Result<QualityConfig> {
    let base = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            let config: QualityConfig = serde_json::from_str(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            debug!("Loaded quality config from {}", path.display());
            config
        }
        None => QualityConfig::default(),
    };

    let mut builder = QualityConfigBuilder::from_config(base);
    if let Some(rows) = args.min_rows {
        builder = builder.min_rows(rows);
    }
    if let Some(columns) = args.max_columns {
        builder = builder.max_columns(columns);
    }
    if let Some(share) = args.max_missing_share {
        builder = builder.max_missing_share(share);
    }
    if let Some(distinct) = args.high_cardinality {
        builder = builder.high_cardinality(distinct);
    }
    if let Some(ratio) = args.id_unique_ratio {
        builder = builder.id_unique_ratio(ratio);
    }
    if let Some(share) = args.zero_share {
        builder = builder.zero_share(share);
    }
    if let Some(policy) = args.id_policy {
        builder = builder.id_policy(policy.into());
    }

    Ok(builder.build()?)
}

/// Load a CSV file, rejecting files without rows or columns.
fn load_dataset(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(anyhow!("Input file not found: {}", path.display()));
    }

    let table = ingest::load_table(path)?;
    if table.is_empty() {
        return Err(EdaError::EmptyDataset.into());
    }
    Ok(table)
}

/// Print the dataset shape and the flattened column summary.
///
/// Uses `println!` for user-facing output so it shows regardless of the
/// log level.
fn run_overview(path: &Path, json: bool) -> Result<()> {
    let table = load_dataset(path)?;
    let summary = DataProfiler::summarize_dataset(&table);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("DATASET OVERVIEW");
    println!("{}\n", "=".repeat(80));
    println!("  File: {}", path.display());
    println!("  Rows: {}", summary.n_rows);
    println!("  Columns: {}", summary.n_cols);
    println!();

    println!(
        "{:<20} {:<10} {:>8} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "Column", "Type", "Non-null", "Missing", "Share", "Unique", "Min", "Max", "Mean"
    );
    println!("{}", "-".repeat(100));
    for row in flatten_summary(&summary) {
        println!(
            "{:<20} {:<10} {:>8} {:>8} {:>8.3} {:>8} {:>10} {:>10} {:>10}",
            truncate_str(&row.name, 19),
            truncate_str(&row.dtype, 9),
            row.non_null,
            row.missing,
            row.missing_share,
            row.unique,
            format_stat(row.min),
            format_stat(row.max),
            format_stat(row.mean),
        );
    }
    println!();

    Ok(())
}

fn run_quality(
    path: &Path,
    config: &QualityConfig,
    criteria: &ReadinessCriteria,
    stats_only: bool,
    json: bool,
) -> Result<()> {
    let table = load_dataset(path)?;
    let summary = DataProfiler::summarize_dataset(&table);
    let missing = missing_table(&table);

    let flags = if stats_only {
        QualityAnalyzer::summary_flags(&summary, &missing, config)
    } else {
        QualityAnalyzer::quality_flags(&summary, &missing, &table, config)
    };
    let readiness = assess_readiness(&summary, &flags, criteria);
    info!(
        "Quality score {:.3}, ok_for_model {}",
        flags.quality_score, readiness.ok_for_model
    );

    if json {
        let output = QualityOutput {
            input_file: path.display().to_string(),
            n_rows: summary.n_rows,
            n_cols: summary.n_cols,
            flags: &flags,
            readiness: &readiness,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("DATA QUALITY");
    println!("{}\n", "=".repeat(80));
    println!("  File: {}", path.display());
    println!("  Shape: {} rows x {} columns", summary.n_rows, summary.n_cols);
    println!("  Quality score: {:.2}", flags.quality_score);
    println!("  Max missing share: {:.3}", flags.max_missing_share());
    println!();

    println!("FLAGS");
    println!("{}", "-".repeat(40));
    for (name, value) in flags.entries() {
        println!("  {:<36} {}", name, if value { "YES" } else { "no" });
    }
    if !flags.is_complete() {
        println!("  (row-level checks skipped)");
    }
    println!();

    println!("MODEL READINESS");
    println!("{}", "-".repeat(40));
    if readiness.ok_for_model {
        println!("  ok_for_model: yes");
    } else {
        println!("  ok_for_model: no");
        for reason in &readiness.reasons {
            println!("  - {}", reason);
        }
    }
    println!();

    Ok(())
}

fn run_report(path: &Path, out_dir: &Path, settings: ReportSettings, json: bool) -> Result<()> {
    let table = load_dataset(path)?;
    let report = ReportGenerator::build_report(path.display().to_string(), &table, settings);

    let generator = ReportGenerator::new(out_dir);
    let written = generator.write_report(&report)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("EDA REPORT");
    println!("{}\n", "=".repeat(80));
    println!(
        "  Shape: {} rows x {} columns",
        report.summary.n_rows, report.summary.n_cols
    );
    println!("  Quality score: {:.2}", report.flags.quality_score);
    println!(
        "  ok_for_model: {}",
        if report.readiness.ok_for_model { "yes" } else { "no" }
    );
    println!();
    println!("FILES WRITTEN");
    println!("{}", "-".repeat(40));
    for file in &written {
        println!("  {}", file.display());
    }
    println!();

    Ok(())
}

fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
