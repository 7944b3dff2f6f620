use super::markdown;
use super::rows::flatten_summary;
use crate::analysis::{CategoryRanker, CorrelationAnalyzer};
use crate::config::{CategoryRankerConfig, QualityConfig, ReadinessCriteria};
use crate::error::{EdaError, Result, ResultExt};
use crate::profiler::{DataProfiler, missing_table};
use crate::quality::{QualityAnalyzer, assess_readiness};
use crate::table::Table;
use crate::types::{
    CorrelationMatrix, DatasetSummary, MissingTable, QualityFlags, RankedColumn,
    ReadinessVerdict, TopCategories,
};
use chrono::Local;
use polars::prelude::{CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ============================================================================
// Report Types
// ============================================================================

/// Parameters a report is built with. Serialized into the report itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Markdown title.
    /// Default: "EDA report"
    pub title: String,

    /// Columns listed as problematic need at least this missing share.
    /// Default: 0.1
    pub min_missing_share: f64,

    /// Skip row-level quality checks.
    /// Default: false
    pub stats_only: bool,

    pub categories: CategoryRankerConfig,
    pub readiness: ReadinessCriteria,
    pub quality: QualityConfig,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "EDA report".to_string(),
            min_missing_share: 0.1,
            stats_only: false,
            categories: CategoryRankerConfig::default(),
            readiness: ReadinessCriteria::default(),
            quality: QualityConfig::default(),
        }
    }
}

/// Every analysis of one dataset, ready for JSON or Markdown output.
#[derive(Debug, Clone, Serialize)]
pub struct EdaReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path (or label) of the analyzed input
    pub input_file: String,
    pub settings: ReportSettings,
    pub summary: DatasetSummary,
    pub missing: MissingTable,
    pub flags: QualityFlags,
    pub readiness: ReadinessVerdict,
    pub correlation: CorrelationMatrix,
    pub top_categories: TopCategories,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds reports and writes them to an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Run every analysis over `table`.
    pub fn build_report(
        input_file: impl Into<String>,
        table: &Table,
        settings: ReportSettings,
    ) -> EdaReport {
        let input_file = input_file.into();
        info!(
            "Building report for {} ({} rows x {} columns)",
            input_file,
            table.n_rows(),
            table.n_cols()
        );

        let summary = DataProfiler::summarize_dataset(table);
        let missing = missing_table(table);
        let flags = if settings.stats_only {
            QualityAnalyzer::summary_flags(&summary, &missing, &settings.quality)
        } else {
            QualityAnalyzer::quality_flags(&summary, &missing, table, &settings.quality)
        };
        let readiness = assess_readiness(&summary, &flags, &settings.readiness);
        let correlation = CorrelationAnalyzer::correlation_matrix(table);
        let top_categories = CategoryRanker::rank(table, &settings.categories);

        debug!(
            "Report ready: score {:.3}, ok_for_model {}",
            flags.quality_score, readiness.ok_for_model
        );

        EdaReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file,
            settings,
            summary,
            missing,
            flags,
            readiness,
            correlation,
            top_categories,
        }
    }

    /// Render the report as Markdown, titled and thresholded by its settings.
    pub fn render_markdown(report: &EdaReport) -> String {
        markdown::render(report)
    }

    /// Write `report.md`, `report.json` and the CSV tables into the output
    /// directory, creating it if needed. Returns the written paths.
    pub fn write_report(&self, report: &EdaReport) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("Creating {}", self.output_dir.display()))?;

        let mut written = Vec::new();

        let md_path = self.output_dir.join("report.md");
        let md = Self::render_markdown(report);
        write_text(&md_path, &md)?;
        written.push(md_path);

        let json_path = self.output_dir.join("report.json");
        write_text(&json_path, &serde_json::to_string_pretty(report)?)?;
        written.push(json_path);

        let summary_path = self.output_dir.join("summary.csv");
        write_csv(&summary_path, &mut summary_frame(&report.summary)?)?;
        written.push(summary_path);

        let missing_path = self.output_dir.join("missing.csv");
        write_csv(&missing_path, &mut missing_frame(&report.missing)?)?;
        written.push(missing_path);

        if !report.correlation.is_empty() {
            let corr_path = self.output_dir.join("correlation.csv");
            write_csv(&corr_path, &mut correlation_frame(&report.correlation)?)?;
            written.push(corr_path);
        }

        if !report.top_categories.is_empty() {
            let top_dir = self.output_dir.join("top_values");
            fs::create_dir_all(&top_dir).context(format!("Creating {}", top_dir.display()))?;

            let mut used = HashSet::new();
            for ranked in report.top_categories.iter() {
                let mut stem = file_stem(&ranked.column);
                while !used.insert(stem.clone()) {
                    stem.push('_');
                }
                let path = top_dir.join(format!("{}.csv", stem));
                write_csv(&path, &mut ranked_frame(ranked)?)?;
                written.push(path);
            }
        }

        info!(
            "Report saved: {} file(s) in {}",
            written.len(),
            self.output_dir.display()
        );

        Ok(written)
    }
}

// ============================================================================
// File helpers
// ============================================================================

fn write_text(path: &Path, content: &str) -> Result<()> {
    let mut file = File::create(path).context(format!("Creating {}", path.display()))?;
    file.write_all(content.as_bytes())
        .context(format!("Writing {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).context(format!("Creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .map_err(|e| {
            EdaError::ReportGenerationFailed(format!("{}: {}", path.display(), e))
        })?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Replace characters that are unsafe in file names.
fn file_stem(column: &str) -> String {
    let stem: String = column
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "column".to_string()
    } else {
        stem
    }
}

fn frame(columns: Vec<Series>) -> Result<DataFrame> {
    Ok(DataFrame::new(columns.into_iter().map(Into::into).collect())?)
}

fn counts(values: impl Iterator<Item = usize>) -> Vec<u64> {
    values.map(|v| v as u64).collect()
}

fn summary_frame(summary: &DatasetSummary) -> Result<DataFrame> {
    let rows = flatten_summary(summary);
    frame(vec![
        Series::new(
            "name".into(),
            rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "dtype".into(),
            rows.iter().map(|r| r.dtype.clone()).collect::<Vec<_>>(),
        ),
        Series::new("non_null".into(), counts(rows.iter().map(|r| r.non_null))),
        Series::new("missing".into(), counts(rows.iter().map(|r| r.missing))),
        Series::new(
            "missing_share".into(),
            rows.iter().map(|r| r.missing_share).collect::<Vec<_>>(),
        ),
        Series::new("unique".into(), counts(rows.iter().map(|r| r.unique))),
        Series::new(
            "is_numeric".into(),
            rows.iter().map(|r| r.is_numeric).collect::<Vec<_>>(),
        ),
        Series::new("min".into(), rows.iter().map(|r| r.min).collect::<Vec<_>>()),
        Series::new("max".into(), rows.iter().map(|r| r.max).collect::<Vec<_>>()),
        Series::new("mean".into(), rows.iter().map(|r| r.mean).collect::<Vec<_>>()),
        Series::new("std".into(), rows.iter().map(|r| r.std).collect::<Vec<_>>()),
        Series::new(
            "example_values".into(),
            rows.iter()
                .map(|r| r.example_values.clone())
                .collect::<Vec<_>>(),
        ),
    ])
}

fn missing_frame(missing: &MissingTable) -> Result<DataFrame> {
    frame(vec![
        Series::new(
            "column".into(),
            missing.iter().map(|e| e.column.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "missing_count".into(),
            counts(missing.iter().map(|e| e.missing_count)),
        ),
        Series::new(
            "missing_share".into(),
            missing.iter().map(|e| e.missing_share).collect::<Vec<_>>(),
        ),
    ])
}

/// Square matrix with a leading label column; undefined cells are empty.
///
/// The label header is `column`, suffixed with `_` until it differs from
/// every matrix column name.
fn correlation_frame(matrix: &CorrelationMatrix) -> Result<DataFrame> {
    let mut label = "column".to_string();
    while matrix.columns.contains(&label) {
        label.push('_');
    }
    let mut columns = vec![Series::new(label.as_str().into(), matrix.columns.clone())];
    for (j, name) in matrix.columns.iter().enumerate() {
        let values: Vec<Option<f64>> = matrix
            .values
            .iter()
            .map(|row| Some(row[j]).filter(|r| !r.is_nan()))
            .collect();
        columns.push(Series::new(name.as_str().into(), values));
    }
    frame(columns)
}

fn ranked_frame(ranked: &RankedColumn) -> Result<DataFrame> {
    frame(vec![
        Series::new(
            "value".into(),
            ranked
                .values
                .iter()
                .map(|c| c.value.clone())
                .collect::<Vec<_>>(),
        ),
        Series::new(
            "count".into(),
            counts(ranked.values.iter().map(|c| c.count)),
        ),
    ])
}
