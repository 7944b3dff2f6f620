//! CSV ingestion into the kind-tagged [`Table`].
//!
//! Polars does the parsing and dtype inference. Each resulting column is then
//! tagged once: integer and float dtypes become numeric, everything else is
//! categorical text.

use crate::error::{EdaError, Result, ResultExt};
use crate::table::{Column, Table};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::{DataFrame, DataType, SerReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Rows polars looks at when inferring column dtypes.
const INFER_SCHEMA_ROWS: usize = 100;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Short dtype label used in summaries.
pub fn dtype_label(dtype: &DataType) -> String {
    let label = match dtype {
        DataType::Int8 => "int8",
        DataType::Int16 => "int16",
        DataType::Int32 => "int32",
        DataType::Int64 => "int64",
        DataType::UInt8 => "uint8",
        DataType::UInt16 => "uint16",
        DataType::UInt32 => "uint32",
        DataType::UInt64 => "uint64",
        DataType::Float32 => "float32",
        DataType::Float64 => "float64",
        DataType::Boolean => "bool",
        DataType::String => "str",
        DataType::Date => "date",
        DataType::Datetime(_, _) => "datetime",
        DataType::Time => "time",
        DataType::Null => "null",
        _ => "other",
    };
    label.to_string()
}

impl Table {
    /// Convert a polars DataFrame, tagging each column's kind.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            columns.push(convert_column(col)?);
        }
        debug!("Converted DataFrame {:?} into table", df.shape());
        Table::new(columns)
    }
}

fn convert_column(col: &polars::prelude::Column) -> Result<Column> {
    let name = col.name().to_string();
    let series = col.as_materialized_series();
    let dtype = series.dtype();
    let label = dtype_label(dtype);

    if dtype.is_integer() {
        // uint64 values past i64::MAX fail the strict cast and are read as floats
        match series.strict_cast(&DataType::Int64) {
            Ok(ints) => {
                let values: Vec<Option<i64>> = ints.i64()?.into_iter().collect();
                return Ok(Column::integer(name, values).with_dtype(label));
            }
            Err(e) => debug!("'{}' does not fit Int64, reading as Float64: {}", name, e),
        }
    }

    if is_numeric_dtype(dtype) {
        let floats = series
            .cast(&DataType::Float64)
            .context(format!("Casting '{}' to Float64", name))?;
        let values: Vec<Option<f64>> = floats.f64()?.into_iter().collect();
        return Ok(Column::numeric(name, values).with_dtype(label));
    }

    if matches!(dtype, DataType::List(_) | DataType::Binary) {
        return Err(EdaError::UnsupportedDtype {
            column: name,
            dtype: label,
        });
    }

    let text = series
        .cast(&DataType::String)
        .context(format!("Casting '{}' to String", name))?;
    let values: Vec<Option<String>> = text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(Column::categorical(name, values).with_dtype(label))
}

/// Load a CSV file with multiple fallback strategies.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();

    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    let content = std::fs::read_to_string(path).map_err(|e| {
        error!("Could not read file {}: {}", path.display(), e);
        EdaError::Io(e)
    })?;
    read_csv_bytes(clean_csv_content(&content).as_bytes())
        .context(format!("Parsing {}", path.display()))
}

/// Parse CSV bytes that are already in memory (e.g. an upload).
pub fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;
    Ok(df)
}

/// Load a CSV file straight into a [`Table`].
pub fn load_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());
    let df = load_csv(path)?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Table::from_dataframe(&df).context(format!("Converting {}", path.display()))
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnKind;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn test_read_csv_bytes_tags_kinds() {
        let csv = b"age,height,city,member\n10,140,A,true\n20,150,B,false\n,160,A,true\n";
        let df = read_csv_bytes(csv).unwrap();
        let table = Table::from_dataframe(&df).unwrap();

        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.column_names(), vec!["age", "height", "city", "member"]);

        let age = table.column("age").unwrap();
        assert_eq!(age.kind(), ColumnKind::Numeric);
        assert_eq!(age.dtype(), "int64");
        assert_eq!(age.missing_count(), 1);

        let member = table.column("member").unwrap();
        assert_eq!(member.kind(), ColumnKind::Categorical);
        assert_eq!(member.dtype(), "bool");
        assert_eq!(
            member.categorical_values().unwrap()[0].as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_csv_integers_keep_exact_values() {
        let csv = b"order_id\n9007199254740993\n9007199254740992\n";
        let table = Table::from_dataframe(&read_csv_bytes(csv).unwrap()).unwrap();

        let ids = table.column("order_id").unwrap();
        assert_eq!(ids.kind(), ColumnKind::Numeric);
        assert_eq!(
            ids.integer_values().unwrap(),
            &[Some(9_007_199_254_740_993), Some(9_007_199_254_740_992)]
        );
    }

    #[test]
    fn test_float_nan_is_missing() {
        let df = DataFrame::new(vec![
            Series::new("x".into(), &[1.0f64, f64::NAN, 3.0]).into(),
        ])
        .unwrap();
        let table = Table::from_dataframe(&df).unwrap();
        assert_eq!(table.column("x").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_dtype_labels() {
        assert_eq!(dtype_label(&DataType::Int32), "int32");
        assert_eq!(dtype_label(&DataType::Float64), "float64");
        assert_eq!(dtype_label(&DataType::String), "str");
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_table("/definitely/not/here.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_clean_csv_content() {
        let cleaned = clean_csv_content("a,b\n\n\"\"x\"\",1\n   \n");
        assert_eq!(cleaned, "a,b\n\"x\",1");
    }
}
