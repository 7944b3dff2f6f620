//! Descriptive statistics over raw column cells.

use crate::table::{Column, ColumnData};
use std::collections::HashSet;

/// Summary statistics of a numeric column's non-missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct NumericStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

/// Hashable key for an f64 that treats `-0.0` and `0.0` as equal.
#[inline]
fn float_key(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// Count distinct non-missing values of a column.
pub(crate) fn distinct_count(column: &Column) -> usize {
    match column.data() {
        ColumnData::Numeric(values) => values
            .iter()
            .flatten()
            .map(|v| float_key(*v))
            .collect::<HashSet<_>>()
            .len(),
        ColumnData::Integer(values) => values.iter().flatten().collect::<HashSet<_>>().len(),
        ColumnData::Categorical(values) => values
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len(),
    }
}

/// Number of cells exactly equal to zero.
pub(crate) fn zero_count(values: &[Option<f64>]) -> usize {
    values.iter().flatten().filter(|v| **v == 0.0).count()
}

/// Compute min/max/mean and the sample standard deviation.
pub(crate) fn describe_numeric(values: &[Option<f64>]) -> NumericStats {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return NumericStats::default();
    }

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    NumericStats {
        min: Some(min),
        max: Some(max),
        mean: Some(mean),
        std: calculate_std(&present, mean),
    }
}

/// Sample standard deviation (n - 1); undefined below two values.
pub(crate) fn calculate_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() as f64 - 1.0);
    Some(variance.sqrt())
}

/// Render a numeric cell the way a CSV would show it.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Up to `limit` distinct non-missing values, in first-seen order.
pub(crate) fn example_values(column: &Column, limit: usize) -> Vec<String> {
    let mut examples = Vec::with_capacity(limit);

    match column.data() {
        ColumnData::Numeric(values) => {
            let mut seen = HashSet::new();
            for v in values.iter().flatten() {
                if examples.len() == limit {
                    break;
                }
                if seen.insert(float_key(*v)) {
                    examples.push(format_number(*v));
                }
            }
        }
        ColumnData::Integer(values) => {
            let mut seen = HashSet::new();
            for v in values.iter().flatten() {
                if examples.len() == limit {
                    break;
                }
                if seen.insert(*v) {
                    examples.push(v.to_string());
                }
            }
        }
        ColumnData::Categorical(values) => {
            let mut seen = HashSet::new();
            for v in values.iter().flatten() {
                if examples.len() == limit {
                    break;
                }
                if seen.insert(v.as_str()) {
                    examples.push(v.clone());
                }
            }
        }
    }

    examples
}
