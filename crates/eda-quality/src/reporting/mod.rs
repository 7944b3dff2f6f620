//! Report generation.
//!
//! [`ReportGenerator::build_report`] runs every analysis over a table and
//! bundles the results into an [`EdaReport`], which serializes to JSON as-is.
//! The same report renders to Markdown and can be written to disk together
//! with CSV exports of its tables.
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_quality::reporting::{ReportGenerator, ReportSettings};
//!
//! let report = ReportGenerator::build_report("data/train.csv", &table, ReportSettings::default());
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let generator = ReportGenerator::new("reports");
//! generator.write_report(&report)?;
//! ```

mod generator;
mod markdown;
mod rows;

pub use generator::{EdaReport, ReportGenerator, ReportSettings};
pub use rows::{SummaryRow, flatten_summary};
