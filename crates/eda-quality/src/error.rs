//! Error types for dataset ingestion, configuration and reporting.
//!
//! The profiling core itself never fails on a well-formed [`Table`](crate::Table):
//! empty datasets, missing raw data and undefined correlations all resolve to
//! well-defined values. Errors only arise at the edges, when a table is built
//! from untrusted input or a report is written to disk.
//!
//! Errors are serializable so a presentation layer can hand them to a client
//! as `{code, message}` objects.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The input cannot form a rectangular, uniquely-named table.
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A source column has a dtype the ingestion layer cannot map.
    #[error("Column '{column}' has unsupported dtype {dtype}")]
    UnsupportedDtype { column: String, dtype: String },

    /// The dataset has no rows or no columns.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedTable(_) => "MALFORMED_TABLE",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedDtype { .. } => "UNSUPPORTED_DTYPE",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the error is caused by the caller's input rather than the
    /// environment (file system, parser internals).
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::MalformedTable(_)
            | Self::ColumnNotFound(_)
            | Self::InvalidConfig(_)
            | Self::UnsupportedDtype { .. }
            | Self::EmptyDataset => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for EdaError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        EdaError::InvalidConfig(err.to_string())
    }
}

/// Errors serialize as a struct with `code` and `message` fields.
impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(EdaError::EmptyDataset.error_code(), "EMPTY_DATASET");
        assert_eq!(
            EdaError::MalformedTable("ragged".to_string()).error_code(),
            "MALFORMED_TABLE"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(EdaError::EmptyDataset.is_input_error());
        assert!(EdaError::MalformedTable("x".to_string()).is_input_error());
        assert!(
            !EdaError::ReportGenerationFailed("disk full".to_string()).is_input_error()
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = EdaError::ColumnNotFound("age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("age"));
    }

    #[test]
    fn test_with_context() {
        let error = EdaError::EmptyDataset.with_context("While loading data.csv");
        assert!(error.to_string().contains("While loading data.csv"));
        assert_eq!(error.error_code(), "EMPTY_DATASET");
        assert!(error.is_input_error());
    }

    #[test]
    fn test_io_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let error = io.context("Reading report dir").unwrap_err();
        assert_eq!(error.error_code(), "IO_ERROR");
    }
}
