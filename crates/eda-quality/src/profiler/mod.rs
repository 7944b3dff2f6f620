//! Column and dataset profiling.
//!
//! This module provides:
//! - Per-column statistics ([`DataProfiler::profile_column`])
//! - The dataset summary ([`DataProfiler::summarize_dataset`])
//! - The missing-value table ([`missing_table`])
//!
//! All functions are pure and never fail: an empty table yields a
//! zero-valued summary.

mod missingness;
pub(crate) mod statistics;

pub use missingness::missing_table;

use crate::table::{Column, Table};
use crate::types::{ColumnSummary, DatasetSummary};
use statistics::{describe_numeric, distinct_count, example_values};
use tracing::debug;

/// Number of example values kept per column.
pub const EXAMPLE_VALUES: usize = 3;

/// Data profiler for summarizing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of a table, preserving column order.
    pub fn summarize_dataset(table: &Table) -> DatasetSummary {
        let columns: Vec<ColumnSummary> = table
            .columns()
            .iter()
            .map(Self::profile_column)
            .collect();

        debug!(
            "Summarized dataset: {} rows x {} columns",
            table.n_rows(),
            columns.len()
        );

        DatasetSummary {
            n_rows: table.n_rows(),
            n_cols: columns.len(),
            columns,
        }
    }

    /// Compute the summary of a single column.
    pub fn profile_column(column: &Column) -> ColumnSummary {
        let total = column.len();
        let missing = column.missing_count();
        let non_null = total - missing;
        let missing_share = share(missing, total);
        let unique = distinct_count(column);

        let stats = column
            .numeric_values()
            .map(|values| describe_numeric(&values))
            .unwrap_or_default();

        debug!(
            "Profiled '{}' ({}): {} missing, {} unique",
            column.name(),
            column.dtype(),
            missing,
            unique
        );

        ColumnSummary {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            non_null,
            missing,
            missing_share,
            unique,
            example_values: example_values(column, EXAMPLE_VALUES),
            is_numeric: column.is_numeric(),
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            std: stats.std,
        }
    }
}

/// `part / total`, defined as 0.0 for an empty total.
#[inline]
pub(crate) fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
