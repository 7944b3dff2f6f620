use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub missing: usize,
    pub missing_share: f64,
    pub unique: usize,
    pub example_values: Vec<String>,
    pub is_numeric: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    pub missing_share: f64,
}

/// Per-column missing counts, worst offenders first.
///
/// Entries are ordered by descending `missing_count`; ties keep the input
/// column order. Serializes as a JSON object keyed by column name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MissingTable {
    entries: Vec<MissingEntry>,
}

impl MissingTable {
    /// Wrap entries given in input column order.
    pub(crate) fn from_input_order(mut entries: Vec<MissingEntry>) -> Self {
        // stable sort keeps input order among ties
        entries.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
        Self { entries }
    }

    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MissingEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[MissingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest missing share, 0.0 for an empty table.
    pub fn max_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }

    /// Entries whose missing share is at least `min_share`.
    pub fn problem_columns(&self, min_share: f64) -> Vec<&MissingEntry> {
        self.entries
            .iter()
            .filter(|e| e.missing_count > 0 && e.missing_share >= min_share)
            .collect()
    }
}

impl Serialize for MissingTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Counts {
            missing_count: usize,
            missing_share: f64,
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(
                &e.column,
                &Counts {
                    missing_count: e.missing_count,
                    missing_share: e.missing_share,
                },
            )?;
        }
        map.end()
    }
}

/// Flags derivable from the dataset summary and missing table alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFlags {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
    pub has_suspicious_id_duplicates: bool,
    pub max_missing_share: f64,
}

/// Flags that need row-level inspection of the raw table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLevelFlags {
    pub has_many_zero_values: bool,
}

/// Quality flags plus the aggregate score, serialized as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    #[serde(flatten)]
    pub summary: SummaryFlags,
    /// `None` when computed without the raw table.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub row_level: Option<RowLevelFlags>,
    pub quality_score: f64,
}

impl QualityFlags {
    /// `false` when the flags were computed from aggregates only.
    pub fn has_many_zero_values(&self) -> bool {
        self.row_level
            .as_ref()
            .is_some_and(|r| r.has_many_zero_values)
    }

    pub fn max_missing_share(&self) -> f64 {
        self.summary.max_missing_share
    }

    /// Whether row-level flags were evaluated.
    pub fn is_complete(&self) -> bool {
        self.row_level.is_some()
    }

    /// Boolean flags by name, in a fixed presentation order.
    pub fn entries(&self) -> Vec<(&'static str, bool)> {
        let s = &self.summary;
        vec![
            ("too_few_rows", s.too_few_rows),
            ("too_many_columns", s.too_many_columns),
            ("too_many_missing", s.too_many_missing),
            ("has_constant_columns", s.has_constant_columns),
            (
                "has_high_cardinality_categoricals",
                s.has_high_cardinality_categoricals,
            ),
            ("has_suspicious_id_duplicates", s.has_suspicious_id_duplicates),
            ("has_many_zero_values", self.has_many_zero_values()),
        ]
    }
}

/// Pearson correlation among numeric columns.
///
/// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`;
/// `NaN` (serialized as `null`) marks an undefined coefficient.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        Some(self.values[i][j])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedColumn {
    pub column: String,
    pub values: Vec<CategoryCount>,
}

/// Most frequent values per categorical column, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopCategories {
    columns: Vec<RankedColumn>,
}

impl TopCategories {
    pub(crate) fn new(columns: Vec<RankedColumn>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&[CategoryCount]> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.values.as_slice())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedColumn> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for TopCategories {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for ranked in &self.columns {
            map.serialize_entry(&ranked.column, &ranked.values)?;
        }
        map.end()
    }
}

/// Whether a dataset is fit to train on, with the failed checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessVerdict {
    pub ok_for_model: bool,
    pub reasons: Vec<String>,
}

static_assertions::assert_impl_all!(DatasetSummary: Send, Sync);
static_assertions::assert_impl_all!(QualityFlags: Send, Sync);
static_assertions::assert_impl_all!(TopCategories: Send, Sync);
