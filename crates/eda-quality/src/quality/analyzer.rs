use crate::config::{IdColumnPolicy, PenaltyWeights, QualityConfig};
use crate::profiler::share;
use crate::profiler::statistics::zero_count;
use crate::table::Table;
use crate::types::{DatasetSummary, MissingTable, QualityFlags, RowLevelFlags, SummaryFlags};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// Identifier naming patterns - compiled once at startup
static EXACT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^id$").expect("Invalid regex: exact id"));
static SUFFIX_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)_id$").expect("Invalid regex: id suffix"));

/// Whether a column name follows the identifier naming convention.
pub fn is_identifier_column(name: &str, policy: IdColumnPolicy) -> bool {
    let name = name.trim();
    match policy {
        IdColumnPolicy::ExactOrSuffix => EXACT_ID.is_match(name) || SUFFIX_ID.is_match(name),
        IdColumnPolicy::ExactOnly => EXACT_ID.is_match(name),
        IdColumnPolicy::SuffixOnly => SUFFIX_ID.is_match(name),
    }
}

/// Threshold heuristics over the dataset summary.
pub struct QualityAnalyzer;

impl QualityAnalyzer {
    /// Flags computable from aggregated statistics alone.
    ///
    /// Row-level flags are left out (`row_level == None`) and do not
    /// contribute to the score.
    pub fn summary_flags(
        summary: &DatasetSummary,
        missing: &MissingTable,
        config: &QualityConfig,
    ) -> QualityFlags {
        let flags = Self::evaluate_summary(summary, missing, config);
        let quality_score = Self::quality_score(&flags, None, &config.weights);

        QualityFlags {
            summary: flags,
            row_level: None,
            quality_score,
        }
    }

    /// Every flag, including those that inspect raw cells.
    pub fn quality_flags(
        summary: &DatasetSummary,
        missing: &MissingTable,
        table: &Table,
        config: &QualityConfig,
    ) -> QualityFlags {
        let flags = Self::evaluate_summary(summary, missing, config);
        let row_level = Self::evaluate_rows(table, config);
        let quality_score = Self::quality_score(&flags, Some(&row_level), &config.weights);

        QualityFlags {
            summary: flags,
            row_level: Some(row_level),
            quality_score,
        }
    }

    /// Aggregate score: 1.0 minus the weight of every triggered condition,
    /// clamped to [0, 1].
    pub fn quality_score(
        flags: &SummaryFlags,
        row_level: Option<&RowLevelFlags>,
        weights: &PenaltyWeights,
    ) -> f64 {
        let penalties = [
            (flags.too_many_missing, weights.too_many_missing),
            (flags.has_constant_columns, weights.has_constant_columns),
            (
                flags.has_suspicious_id_duplicates,
                weights.has_suspicious_id_duplicates,
            ),
            (flags.too_few_rows, weights.too_few_rows),
            (
                flags.has_high_cardinality_categoricals,
                weights.has_high_cardinality_categoricals,
            ),
            (
                row_level.is_some_and(|r| r.has_many_zero_values),
                weights.has_many_zero_values,
            ),
        ];

        let score = penalties
            .iter()
            .filter(|(triggered, _)| *triggered)
            .fold(1.0, |score, (_, weight)| score - weight);

        score.clamp(0.0, 1.0)
    }

    fn evaluate_summary(
        summary: &DatasetSummary,
        missing: &MissingTable,
        config: &QualityConfig,
    ) -> SummaryFlags {
        let t = &config.thresholds;

        let max_missing_share = if missing.is_empty() {
            summary
                .columns
                .iter()
                .map(|c| c.missing_share)
                .fold(0.0, f64::max)
        } else {
            missing.max_share()
        };

        let constant: Vec<&str> = summary
            .columns
            .iter()
            .filter(|c| c.unique <= 1)
            .map(|c| c.name.as_str())
            .collect();

        let high_cardinality: Vec<&str> = summary
            .columns
            .iter()
            .filter(|c| !c.is_numeric && c.unique > t.high_cardinality)
            .map(|c| c.name.as_str())
            .collect();

        let duplicated_ids: Vec<&str> = summary
            .columns
            .iter()
            .filter(|c| is_identifier_column(&c.name, config.id_policy))
            .filter(|c| c.non_null > 0 && share(c.unique, c.non_null) < t.id_unique_ratio)
            .map(|c| c.name.as_str())
            .collect();

        if !constant.is_empty() {
            debug!("Constant columns: {:?}", constant);
        }
        if !high_cardinality.is_empty() {
            debug!("High-cardinality categoricals: {:?}", high_cardinality);
        }
        if !duplicated_ids.is_empty() {
            debug!("Identifier columns with duplicates: {:?}", duplicated_ids);
        }

        SummaryFlags {
            too_few_rows: summary.n_rows < t.min_rows,
            too_many_columns: summary.n_cols > t.max_columns,
            too_many_missing: max_missing_share > t.max_missing_share,
            has_constant_columns: !constant.is_empty(),
            has_high_cardinality_categoricals: !high_cardinality.is_empty(),
            has_suspicious_id_duplicates: !duplicated_ids.is_empty(),
            max_missing_share,
        }
    }

    fn evaluate_rows(table: &Table, config: &QualityConfig) -> RowLevelFlags {
        let n_rows = table.n_rows();
        let zero_heavy = table.columns().iter().find(|col| {
            col.numeric_values().is_some_and(|values| {
                n_rows > 0 && share(zero_count(&values), n_rows) > config.thresholds.zero_share
            })
        });

        if let Some(col) = zero_heavy {
            debug!("Column '{}' is dominated by zeros", col.name());
        }

        RowLevelFlags {
            has_many_zero_values: zero_heavy.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::{DataProfiler, missing_table};
    use crate::table::Column;

    fn flags_for(table: &Table) -> QualityFlags {
        flags_with(table, &QualityConfig::default())
    }

    fn flags_with(table: &Table, config: &QualityConfig) -> QualityFlags {
        let summary = DataProfiler::summarize_dataset(table);
        let missing = missing_table(table);
        QualityAnalyzer::quality_flags(&summary, &missing, table, config)
    }

    fn ints(name: &str, values: impl IntoIterator<Item = i64>) -> Column {
        Column::integer(name, values.into_iter().map(Some))
    }

    /// 120 well-formed rows: unique ids, a varied measure, a 5-level category.
    fn clean_table() -> Table {
        let n = 120;
        let levels = ["north", "south", "east", "west", "center"];
        Table::new(vec![
            ints("id", 1..=n),
            Column::numeric("value", (1..=n).map(|i| Some(i as f64 * 1.5 + (i % 7) as f64))),
            Column::categorical("region", (0..n).map(|i| Some(levels[i as usize % 5]))),
        ])
        .unwrap()
    }

    // ==================== identifier naming tests ====================

    #[test]
    fn test_identifier_names_default_policy() {
        let policy = IdColumnPolicy::ExactOrSuffix;
        assert!(is_identifier_column("id", policy));
        assert!(is_identifier_column("ID", policy));
        assert!(is_identifier_column("user_id", policy));
        assert!(!is_identifier_column("idea", policy));
        assert!(!is_identifier_column("paid", policy));
        assert!(!is_identifier_column("identity", policy));
    }

    #[test]
    fn test_identifier_names_strict_policies() {
        assert!(is_identifier_column("id", IdColumnPolicy::ExactOnly));
        assert!(!is_identifier_column("user_id", IdColumnPolicy::ExactOnly));
        assert!(is_identifier_column("user_id", IdColumnPolicy::SuffixOnly));
        assert!(!is_identifier_column("id", IdColumnPolicy::SuffixOnly));
    }

    // ==================== individual flag tests ====================

    #[test]
    fn test_has_constant_columns() {
        let table = Table::new(vec![
            ints("id", [1, 2, 3, 4]),
            ints("constant_col", [5, 5, 5, 5]),
            ints("normal_col", [10, 20, 30, 40]),
        ])
        .unwrap();

        assert!(flags_for(&table).summary.has_constant_columns);
    }

    #[test]
    fn test_all_missing_column_is_constant() {
        let table = Table::new(vec![
            ints("a", [1, 2, 3]),
            Column::numeric("empty", [None, None, None]),
        ])
        .unwrap();

        assert!(flags_for(&table).summary.has_constant_columns);
    }

    #[test]
    fn test_high_cardinality_categoricals() {
        let values: Vec<Option<String>> = (0..150).map(|i| Some(format!("value_{i}"))).collect();
        let table = Table::new(vec![Column::categorical("cat_col", values)]).unwrap();

        assert!(flags_for(&table).summary.has_high_cardinality_categoricals);
    }

    #[test]
    fn test_cardinality_at_threshold_does_not_fire() {
        let values: Vec<Option<String>> = (0..100).map(|i| Some(format!("v{i}"))).collect();
        let table = Table::new(vec![Column::categorical("cat_col", values)]).unwrap();

        assert!(!flags_for(&table).summary.has_high_cardinality_categoricals);
    }

    #[test]
    fn test_numeric_cardinality_is_ignored() {
        let table = Table::new(vec![ints("amount", 0..500)]).unwrap();
        assert!(!flags_for(&table).summary.has_high_cardinality_categoricals);
    }

    #[test]
    fn test_suspicious_id_duplicates() {
        // 3 distinct ids over 6 rows: 0.5 < 0.9
        let table = Table::new(vec![
            ints("user_id", [1, 2, 2, 3, 3, 3]),
            ints("value", [10, 20, 30, 40, 50, 60]),
        ])
        .unwrap();

        assert!(flags_for(&table).summary.has_suspicious_id_duplicates);
    }

    #[test]
    fn test_id_duplicates_respect_policy() {
        let table = Table::new(vec![ints("user_id", [1, 1, 1, 1])]).unwrap();
        let config = QualityConfig::builder()
            .id_policy(IdColumnPolicy::ExactOnly)
            .build()
            .unwrap();

        assert!(!flags_with(&table, &config).summary.has_suspicious_id_duplicates);
    }

    #[test]
    fn test_id_ratio_ignores_missing_cells() {
        // 4 distinct of 4 non-null despite two gaps
        let table =
            Table::new(vec![Column::integer("id", [Some(1), None, Some(2), Some(3), None, Some(4)])])
                .unwrap();
        assert!(!flags_for(&table).summary.has_suspicious_id_duplicates);
    }

    #[test]
    fn test_large_integer_ids_stay_distinct() {
        let table = Table::new(vec![ints(
            "user_id",
            (0..10).map(|i| 1_000_000_000_000_000_000 + i),
        )])
        .unwrap();

        let flags = flags_for(&table);
        assert!(!flags.summary.has_suspicious_id_duplicates);
        assert!(!flags.summary.has_constant_columns);
    }

    #[test]
    fn test_many_zero_values() {
        // 6 of 8 cells are zero: 0.75 > 0.5
        let table = Table::new(vec![
            ints("numeric_col", [0, 0, 0, 5, 10, 0, 0, 0]),
            ints("another_col", [1, 2, 3, 4, 5, 6, 7, 8]),
        ])
        .unwrap();

        let flags = flags_for(&table);
        assert!(flags.has_many_zero_values());
        assert!(flags.is_complete());
    }

    #[test]
    fn test_half_zeros_does_not_fire() {
        let table = Table::new(vec![ints("n", [0, 0, 1, 2])]).unwrap();
        assert!(!flags_for(&table).has_many_zero_values());
    }

    #[test]
    fn test_zero_share_threshold_override() {
        let table = Table::new(vec![ints("n", [0, 0, 1, 2])]).unwrap();
        let config = QualityConfig::builder().zero_share(0.3).build().unwrap();
        assert!(flags_with(&table, &config).has_many_zero_values());
    }

    #[test]
    fn test_text_zeros_are_not_numeric_zeros() {
        let table = Table::new(vec![Column::categorical("code", [Some("0"), Some("0"), Some("1")])])
            .unwrap();
        assert!(!flags_for(&table).has_many_zero_values());
    }

    #[test]
    fn test_row_and_column_count_flags() {
        let table = Table::new(vec![ints("a", [1, 2, 3])]).unwrap();
        let flags = flags_for(&table);
        assert!(flags.summary.too_few_rows);
        assert!(!flags.summary.too_many_columns);

        let wide: Vec<Column> = (0..101).map(|i| ints(&format!("c{i}"), [i, i + 1])).collect();
        let flags = flags_for(&Table::new(wide).unwrap());
        assert!(flags.summary.too_many_columns);
    }

    #[test]
    fn test_too_many_missing_and_max_share() {
        let table = Table::new(vec![
            Column::numeric("sparse", [Some(1.0), None, None, None]),
            ints("full", [1, 2, 3, 4]),
        ])
        .unwrap();

        let flags = flags_for(&table);
        assert!(flags.summary.too_many_missing);
        assert_eq!(flags.max_missing_share(), 0.75);
    }

    #[test]
    fn test_half_missing_is_not_too_many() {
        let table = Table::new(vec![Column::numeric("half", [Some(1.0), Some(2.0), None, None])])
            .unwrap();
        let flags = flags_for(&table);
        assert!(!flags.summary.too_many_missing);
        assert_eq!(flags.max_missing_share(), 0.5);
    }

    // ==================== quality score tests ====================

    #[test]
    fn test_clean_dataset_scores_high() {
        let flags = flags_for(&clean_table());

        assert!(!flags.summary.too_few_rows);
        assert!(!flags.summary.has_constant_columns);
        assert!(!flags.summary.has_high_cardinality_categoricals);
        assert!(!flags.summary.has_suspicious_id_duplicates);
        assert!(!flags.has_many_zero_values());
        assert_eq!(flags.quality_score, 1.0);
    }

    #[test]
    fn test_small_clean_dataset_still_above_threshold() {
        let table = Table::new(vec![
            ints("id", [1, 2, 3, 4, 5]),
            Column::categorical("name", ["A", "B", "C", "D", "E"].map(Some)),
            Column::numeric("value", [10.5, 20.3, 30.1, 40.2, 50.0].map(Some)),
        ])
        .unwrap();

        let flags = flags_for(&table);
        assert!(!flags.summary.has_constant_columns);
        assert!(!flags.summary.has_high_cardinality_categoricals);
        assert!(!flags.summary.has_suspicious_id_duplicates);
        assert!(!flags.has_many_zero_values());
        assert!(flags.quality_score > 0.7);
    }

    #[test]
    fn test_score_subtracts_each_weight() {
        let table = Table::new(vec![
            ints("user_id", [1, 1, 1, 1]),
            Column::numeric("sparse", [Some(0.0), None, None, None]),
        ])
        .unwrap();
        let flags = flags_for(&table);
        let w = PenaltyWeights::default();

        // constant, id duplicates, too few rows, too many missing
        let expected = 1.0 - w.has_constant_columns
            - w.has_suspicious_id_duplicates
            - w.too_few_rows
            - w.too_many_missing;
        assert!((flags.quality_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_clamped() {
        let all = SummaryFlags {
            too_few_rows: true,
            too_many_columns: true,
            too_many_missing: true,
            has_constant_columns: true,
            has_high_cardinality_categoricals: true,
            has_suspicious_id_duplicates: true,
            max_missing_share: 1.0,
        };
        let heavy = PenaltyWeights {
            too_many_missing: 1.0,
            has_constant_columns: 1.0,
            has_suspicious_id_duplicates: 1.0,
            too_few_rows: 1.0,
            has_high_cardinality_categoricals: 1.0,
            has_many_zero_values: 1.0,
        };
        let row = RowLevelFlags {
            has_many_zero_values: true,
        };

        assert_eq!(QualityAnalyzer::quality_score(&all, Some(&row), &heavy), 0.0);
        let default_score =
            QualityAnalyzer::quality_score(&all, Some(&row), &PenaltyWeights::default());
        assert!((0.0..=1.0).contains(&default_score));
    }

    #[test]
    fn test_too_many_columns_carries_no_penalty() {
        let wide: Vec<Column> = (0..101)
            .map(|i| Column::integer(format!("c{i}"), (0..120).map(|r| Some(r * (i + 1) + 1))))
            .collect();
        let flags = flags_for(&Table::new(wide).unwrap());

        assert!(flags.summary.too_many_columns);
        assert_eq!(flags.quality_score, 1.0);
    }

    #[test]
    fn test_score_bounds_on_empty_table() {
        let flags = flags_for(&Table::empty());
        assert!(flags.summary.too_few_rows);
        assert_eq!(flags.max_missing_share(), 0.0);
        assert!((0.0..=1.0).contains(&flags.quality_score));
    }

    // ==================== stats-only variant tests ====================

    #[test]
    fn test_summary_flags_skip_row_level() {
        let table = Table::new(vec![ints("numeric_col", [0, 0, 0, 5, 10, 0, 0, 0])]).unwrap();
        let summary = DataProfiler::summarize_dataset(&table);
        let missing = missing_table(&table);

        let stats_only =
            QualityAnalyzer::summary_flags(&summary, &missing, &QualityConfig::default());
        let full = flags_for(&table);

        assert!(stats_only.row_level.is_none());
        assert!(!stats_only.has_many_zero_values());
        assert!(full.has_many_zero_values());
        assert_eq!(stats_only.summary, full.summary);
        assert!(stats_only.quality_score > full.quality_score);
    }

    #[test]
    fn test_summary_flags_fall_back_to_summary_shares() {
        let table = Table::new(vec![Column::numeric("x", [Some(1.0), None, None])]).unwrap();
        let summary = DataProfiler::summarize_dataset(&table);

        let flags = QualityAnalyzer::summary_flags(
            &summary,
            &MissingTable::default(),
            &QualityConfig::default(),
        );
        assert!(flags.summary.too_many_missing);
        assert!((flags.max_missing_share() - 2.0 / 3.0).abs() < 1e-12);
    }
}
