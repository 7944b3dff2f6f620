use crate::types::{ColumnSummary, DatasetSummary};
use serde::{Deserialize, Serialize};

/// One flat row per column, suitable for console tables and CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub missing: usize,
    pub missing_share: f64,
    pub unique: usize,
    pub is_numeric: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    /// Example values joined with `", "`.
    pub example_values: String,
}

impl From<&ColumnSummary> for SummaryRow {
    fn from(col: &ColumnSummary) -> Self {
        Self {
            name: col.name.clone(),
            dtype: col.dtype.clone(),
            non_null: col.non_null,
            missing: col.missing,
            missing_share: col.missing_share,
            unique: col.unique,
            is_numeric: col.is_numeric,
            min: col.min,
            max: col.max,
            mean: col.mean,
            std: col.std,
            example_values: col.example_values.join(", "),
        }
    }
}

/// Flatten a dataset summary into one row per column, in column order.
pub fn flatten_summary(summary: &DatasetSummary) -> Vec<SummaryRow> {
    summary.columns.iter().map(SummaryRow::from).collect()
}
