//! Most frequent values of categorical columns.

use crate::config::CategoryRankerConfig;
use crate::table::Table;
use crate::types::{CategoryCount, RankedColumn, TopCategories};
use std::collections::HashMap;
use tracing::debug;

/// Frequency ranking for categorical columns.
pub struct CategoryRanker;

impl CategoryRanker {
    /// Rank values of the first `max_columns` categorical columns.
    ///
    /// Each column keeps its `top_k` most frequent non-missing values; equal
    /// counts are ordered by first appearance. Columns past the cap are left
    /// out.
    pub fn top_categories(table: &Table, max_columns: usize, top_k: usize) -> TopCategories {
        let ranked: Vec<RankedColumn> = table
            .columns()
            .iter()
            .filter_map(|col| col.categorical_values().map(|v| (col.name(), v)))
            .take(max_columns)
            .map(|(name, values)| RankedColumn {
                column: name.to_string(),
                values: rank_values(values, top_k),
            })
            .collect();

        debug!(
            "Ranked top {} values for {} categorical column(s)",
            top_k,
            ranked.len()
        );

        TopCategories::new(ranked)
    }

    /// [`CategoryRanker::top_categories`] with parameters from a config.
    pub fn rank(table: &Table, config: &CategoryRankerConfig) -> TopCategories {
        Self::top_categories(table, config.max_columns, config.top_k)
    }
}

fn rank_values(values: &[Option<String>], top_k: usize) -> Vec<CategoryCount> {
    // value -> (count, index of first appearance)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.iter().enumerate() {
        if let Some(value) = value {
            counts.entry(value.as_str()).or_insert((0, idx)).0 += 1;
        }
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));

    ranked
        .into_iter()
        .take(top_k)
        .map(|(value, (count, _))| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}
