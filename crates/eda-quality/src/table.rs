//! In-memory table model consumed by the profiling core.
//!
//! A [`Table`] is an ordered list of named [`Column`]s of equal length. Each
//! column carries its kind as an explicit [`ColumnData`] variant decided once
//! at ingestion; nothing downstream re-infers types. `None` marks a missing
//! cell, and numeric `NaN`s are folded into `None` when a column is built.

use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Kind of a column for profiling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Cell storage for one column.
///
/// Integers keep their exact `i64` values; they are only widened to `f64`
/// for arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Integer(Vec<Option<i64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) | ColumnData::Integer(_) => ColumnKind::Numeric,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Integer(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, kind-tagged column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: String,
    data: ColumnData,
}

impl Column {
    /// Build a floating point column. `NaN` cells become missing.
    pub fn numeric<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Self {
            name: name.into(),
            dtype: "float64".to_string(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Build an integer column. Values keep their exact identity, so large
    /// ids stay distinct.
    pub fn integer<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        Self {
            name: name.into(),
            dtype: "int64".to_string(),
            data: ColumnData::Integer(values.into_iter().collect()),
        }
    }

    /// Build a text column.
    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self {
            name: name.into(),
            dtype: "str".to_string(),
            data: ColumnData::Categorical(values),
        }
    }

    /// Override the dtype label reported in summaries.
    pub fn with_dtype(mut self, dtype: impl Into<String>) -> Self {
        self.dtype = dtype.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> &str {
        &self.dtype
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Integer(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Numeric cells as `f64`, or `None` for a categorical column.
    ///
    /// Integer cells are widened on the fly; use
    /// [`Column::integer_values`] where exact identity matters.
    pub fn numeric_values(&self) -> Option<Cow<'_, [Option<f64>]>> {
        match &self.data {
            ColumnData::Numeric(values) => Some(Cow::Borrowed(values.as_slice())),
            ColumnData::Integer(values) => Some(Cow::Owned(
                values.iter().map(|v| v.map(|x| x as f64)).collect(),
            )),
            ColumnData::Categorical(_) => None,
        }
    }

    /// Exact integer cells, or `None` unless the column holds integers.
    pub fn integer_values(&self) -> Option<&[Option<i64>]> {
        match &self.data {
            ColumnData::Integer(values) => Some(values),
            _ => None,
        }
    }

    /// Text cells, or `None` for a numeric column.
    pub fn categorical_values(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Numeric(_) | ColumnData::Integer(_) => None,
            ColumnData::Categorical(values) => Some(values),
        }
    }
}

/// A rectangular table of uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Assemble a table, rejecting ragged columns and duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(EdaError::MalformedTable(format!(
                    "duplicate column name '{}'",
                    col.name()
                )));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(EdaError::MalformedTable(format!(
                    "column '{}' has {} rows, expected {} (from '{}')",
                    bad.name(),
                    bad.len(),
                    expected,
                    first.name()
                )));
            }
        }

        Ok(Self { columns })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Row count; 0 when the table has no columns.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.n_cols() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Like [`Table::column`] but reports a missing name as an error.
    pub fn try_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| EdaError::ColumnNotFound(name.to_string()))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }
}

static_assertions::assert_impl_all!(Table: Send, Sync);
