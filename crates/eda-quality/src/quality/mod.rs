//! Data quality heuristics.
//!
//! This module turns a dataset summary and missing table into named quality
//! flags and an aggregate score, and derives the `ok_for_model` verdict.
//!
//! Two entry points exist: [`QualityAnalyzer::summary_flags`] works from
//! aggregates only, [`QualityAnalyzer::quality_flags`] also inspects raw
//! cells for the row-level flags.

mod analyzer;
mod readiness;

pub use analyzer::{QualityAnalyzer, is_identifier_column};
pub use readiness::assess_readiness;
