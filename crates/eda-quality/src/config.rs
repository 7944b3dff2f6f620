//! Configuration types for the quality heuristics and category ranking.
//!
//! Every threshold the heuristics compare against lives here, together with
//! the penalty weights that drive the aggregate quality score. Values are
//! passed in as plain parameters; nothing in the library reads the
//! environment.

use serde::{Deserialize, Serialize};

/// Rule deciding which column names denote identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IdColumnPolicy {
    /// `id` exactly, or any name ending in `_id` (case-insensitive)
    #[default]
    ExactOrSuffix,
    /// Only a column named `id` (case-insensitive)
    ExactOnly,
    /// Only names ending in `_id` (case-insensitive)
    SuffixOnly,
}

/// Thresholds used by the quality flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// `too_few_rows` fires below this row count.
    /// Default: 100
    pub min_rows: usize,

    /// `too_many_columns` fires above this column count.
    /// Default: 100
    pub max_columns: usize,

    /// `too_many_missing` fires when some column's missing share exceeds this.
    /// Default: 0.5
    pub max_missing_share: f64,

    /// `has_high_cardinality_categoricals` fires when a categorical column has
    /// more distinct values than this.
    /// Default: 100
    pub high_cardinality: usize,

    /// `has_suspicious_id_duplicates` fires when an identifier column's
    /// distinct/non-null ratio is below this.
    /// Default: 0.9
    pub id_unique_ratio: f64,

    /// `has_many_zero_values` fires when a numeric column's share of zeros
    /// exceeds this.
    /// Default: 0.5
    pub zero_share: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_rows: 100,
            max_columns: 100,
            max_missing_share: 0.5,
            high_cardinality: 100,
            id_unique_ratio: 0.9,
            zero_share: 0.5,
        }
    }
}

/// Score penalties subtracted from 1.0 for each triggered condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    pub too_many_missing: f64,
    pub has_constant_columns: f64,
    pub has_suspicious_id_duplicates: f64,
    pub too_few_rows: f64,
    pub has_high_cardinality_categoricals: f64,
    pub has_many_zero_values: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            too_many_missing: 0.3,
            has_constant_columns: 0.2,
            has_suspicious_id_duplicates: 0.15,
            too_few_rows: 0.1,
            has_high_cardinality_categoricals: 0.1,
            has_many_zero_values: 0.1,
        }
    }
}

impl PenaltyWeights {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("too_many_missing", self.too_many_missing),
            ("has_constant_columns", self.has_constant_columns),
            ("has_suspicious_id_duplicates", self.has_suspicious_id_duplicates),
            ("too_few_rows", self.too_few_rows),
            (
                "has_high_cardinality_categoricals",
                self.has_high_cardinality_categoricals,
            ),
            ("has_many_zero_values", self.has_many_zero_values),
        ]
    }
}

/// Configuration for the quality heuristics.
///
/// Use [`QualityConfig::builder()`] to override individual values.
///
/// # Example
///
/// ```rust,ignore
/// use eda_quality::config::{QualityConfig, IdColumnPolicy};
///
/// let config = QualityConfig::builder()
///     .min_rows(500)
///     .id_policy(IdColumnPolicy::ExactOnly)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub thresholds: QualityThresholds,
    pub weights: PenaltyWeights,
    pub id_policy: IdColumnPolicy,
}

impl QualityConfig {
    /// Create a new configuration builder.
    pub fn builder() -> QualityConfigBuilder {
        QualityConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let t = &self.thresholds;
        for (field, value) in [
            ("max_missing_share", t.max_missing_share),
            ("id_unique_ratio", t.id_unique_ratio),
            ("zero_share", t.zero_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        for (field, value) in self.weights.named() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidWeight {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid penalty weight for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidWeight { field: String, value: f64 },
}

/// Builder for [`QualityConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct QualityConfigBuilder {
    thresholds: QualityThresholds,
    weights: PenaltyWeights,
    id_policy: IdColumnPolicy,
}

impl QualityConfigBuilder {
    /// Start from an existing configuration, e.g. one loaded from JSON.
    pub fn from_config(config: QualityConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            weights: config.weights,
            id_policy: config.id_policy,
        }
    }

    pub fn min_rows(mut self, rows: usize) -> Self {
        self.thresholds.min_rows = rows;
        self
    }

    pub fn max_columns(mut self, columns: usize) -> Self {
        self.thresholds.max_columns = columns;
        self
    }

    /// Set the missing share above which `too_many_missing` fires.
    ///
    /// # Arguments
    /// * `share` - Value between 0.0 and 1.0 (e.g., 0.5 = 50%)
    pub fn max_missing_share(mut self, share: f64) -> Self {
        self.thresholds.max_missing_share = share;
        self
    }

    pub fn high_cardinality(mut self, distinct: usize) -> Self {
        self.thresholds.high_cardinality = distinct;
        self
    }

    /// Set the distinct/non-null ratio below which an identifier column
    /// counts as duplicated.
    pub fn id_unique_ratio(mut self, ratio: f64) -> Self {
        self.thresholds.id_unique_ratio = ratio;
        self
    }

    pub fn zero_share(mut self, share: f64) -> Self {
        self.thresholds.zero_share = share;
        self
    }

    pub fn weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn id_policy(mut self, policy: IdColumnPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `QualityConfig` or an error if validation fails.
    pub fn build(self) -> Result<QualityConfig, ConfigValidationError> {
        let config = QualityConfig {
            thresholds: self.thresholds,
            weights: self.weights,
            id_policy: self.id_policy,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Parameters for [`CategoryRanker`](crate::analysis::CategoryRanker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRankerConfig {
    /// Maximum number of categorical columns to rank.
    /// Default: 5
    pub max_columns: usize,

    /// Number of most frequent values kept per column.
    /// Default: 5
    pub top_k: usize,
}

impl Default for CategoryRankerConfig {
    fn default() -> Self {
        Self {
            max_columns: 5,
            top_k: 5,
        }
    }
}

/// Criteria for the `ok_for_model` verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessCriteria {
    /// Minimum number of rows.
    /// Default: 50
    pub min_rows: usize,

    /// The largest per-column missing share must stay strictly below this.
    /// Default: 0.5
    pub max_missing_share: f64,
}

impl Default for ReadinessCriteria {
    fn default() -> Self {
        Self {
            min_rows: 50,
            max_missing_share: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QualityConfig::default();
        assert_eq!(config.thresholds.min_rows, 100);
        assert_eq!(config.thresholds.max_columns, 100);
        assert_eq!(config.thresholds.max_missing_share, 0.5);
        assert_eq!(config.thresholds.high_cardinality, 100);
        assert_eq!(config.thresholds.id_unique_ratio, 0.9);
        assert_eq!(config.thresholds.zero_share, 0.5);
        assert_eq!(config.id_policy, IdColumnPolicy::ExactOrSuffix);
    }

    #[test]
    fn test_default_weights_rank_missingness_highest() {
        let w = PenaltyWeights::default();
        assert!(w.too_many_missing > w.has_constant_columns);
        assert!(w.has_constant_columns > w.has_high_cardinality_categoricals);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = QualityConfig::builder()
            .min_rows(10)
            .max_columns(20)
            .zero_share(0.3)
            .high_cardinality(50)
            .id_policy(IdColumnPolicy::SuffixOnly)
            .build()
            .unwrap();

        assert_eq!(config.thresholds.min_rows, 10);
        assert_eq!(config.thresholds.max_columns, 20);
        assert_eq!(config.thresholds.zero_share, 0.3);
        assert_eq!(config.thresholds.high_cardinality, 50);
        assert_eq!(config.id_policy, IdColumnPolicy::SuffixOnly);
    }

    #[test]
    fn test_validation_invalid_share() {
        let result = QualityConfig::builder().max_missing_share(1.5).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_invalid_weight() {
        let weights = PenaltyWeights {
            too_few_rows: -0.1,
            ..PenaltyWeights::default()
        };
        let result = QualityConfig::builder().weights(weights).build();

        match result.unwrap_err() {
            ConfigValidationError::InvalidWeight { field, .. } => {
                assert_eq!(field, "too_few_rows")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partial_config_from_json() {
        // A config file only needs to mention the values it overrides
        let json = r#"{
            "thresholds": { "min_rows": 20, "zero_share": 0.3 },
            "id_policy": "ExactOnly"
        }"#;

        let config: QualityConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.thresholds.min_rows, 20);
        assert_eq!(config.thresholds.zero_share, 0.3);
        assert_eq!(config.thresholds.max_columns, 100);
        assert_eq!(config.weights, PenaltyWeights::default());
        assert_eq!(config.id_policy, IdColumnPolicy::ExactOnly);
    }

    #[test]
    fn test_builder_from_config_keeps_values() {
        let base = QualityConfig::builder().min_rows(7).build().unwrap();
        let config = QualityConfigBuilder::from_config(base)
            .max_columns(3)
            .build()
            .unwrap();
        assert_eq!(config.thresholds.min_rows, 7);
        assert_eq!(config.thresholds.max_columns, 3);
    }

    #[test]
    fn test_ranker_and_readiness_defaults() {
        let ranker = CategoryRankerConfig::default();
        assert_eq!((ranker.max_columns, ranker.top_k), (5, 5));

        let readiness = ReadinessCriteria::default();
        assert_eq!(readiness.min_rows, 50);
        assert_eq!(readiness.max_missing_share, 0.5);
    }
}
