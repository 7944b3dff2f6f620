//! Exploratory data analysis and data-quality scoring for tabular datasets.
//!
//! # Overview
//!
//! Given a table, this library produces:
//!
//! - **Dataset summary**: per-column type, missingness, cardinality, example
//!   values and numeric statistics
//! - **Missing table**: per-column missing counts and shares
//! - **Quality flags**: named heuristics plus an aggregate score in [0, 1]
//! - **Model readiness**: an `ok_for_model` verdict with reasons
//! - **Correlation**: Pearson coefficients among numeric columns
//! - **Top categories**: most frequent values of categorical columns
//!
//! Every analysis is a pure function of an immutable [`Table`]. CSV files are
//! read into a table with polars in [`ingest`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_quality::{DataProfiler, QualityAnalyzer, QualityConfig, ingest, missing_table};
//!
//! let table = ingest::load_table("data.csv")?;
//! let summary = DataProfiler::summarize_dataset(&table);
//! let missing = missing_table(&table);
//!
//! let flags = QualityAnalyzer::quality_flags(&summary, &missing, &table, &QualityConfig::default());
//! println!("quality score: {:.2}", flags.quality_score);
//! ```
//!
//! # Configuration
//!
//! Thresholds, penalty weights and the identifier-name rule live in
//! [`QualityConfig`]:
//!
//! ```rust,ignore
//! use eda_quality::config::{IdColumnPolicy, QualityConfig};
//!
//! let config = QualityConfig::builder()
//!     .min_rows(500)
//!     .max_missing_share(0.3)
//!     .id_policy(IdColumnPolicy::SuffixOnly)
//!     .build()?;
//! ```
//!
//! # Reports
//!
//! [`ReportGenerator`] bundles every analysis into one [`EdaReport`] that
//! serializes to JSON, renders to Markdown and exports its tables as CSV.

pub mod analysis;
pub mod config;
pub mod error;
pub mod ingest;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod table;
pub mod types;

// Re-exports for convenient access
pub use analysis::{CategoryRanker, CorrelationAnalyzer};
pub use config::{
    CategoryRankerConfig, ConfigValidationError, IdColumnPolicy, PenaltyWeights, QualityConfig,
    QualityConfigBuilder, QualityThresholds, ReadinessCriteria,
};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use profiler::{DataProfiler, missing_table};
pub use quality::{QualityAnalyzer, assess_readiness, is_identifier_column};
pub use reporting::{EdaReport, ReportGenerator, ReportSettings, SummaryRow, flatten_summary};
pub use table::{Column, ColumnData, ColumnKind, Table};
pub use types::{
    CategoryCount, ColumnSummary, CorrelationMatrix, DatasetSummary, MissingEntry, MissingTable,
    QualityFlags, RankedColumn, ReadinessVerdict, RowLevelFlags, SummaryFlags, TopCategories,
};
