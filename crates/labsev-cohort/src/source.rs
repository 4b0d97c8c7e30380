//! Reading the on-disk table into rows of loosely typed cells.
//!
//! Two encodings are understood: CSV with a header row, and JSON either as
//! an array of row objects or as an object of equal-length column arrays.
//! Cells are kept as `serde_json::Value` until column resolution in
//! [`crate::load`] coerces them.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found")]
    NotFound,

    #[error("unsupported format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("malformed table: {0}")]
    Malformed(String),

    #[error("row {row}: invalid value for '{column}': {reason}")]
    InvalidCell {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which severity column pair to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnConvention {
    /// Prefer `final_*`, fall back to `lab_*`.
    #[default]
    Auto,
    /// `final_severity_label` / `final_severity_score`.
    Final,
    /// `lab_severity_label` / `lab_severity_score`.
    Lab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" => Ok(SourceFormat::Json),
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Handle to a precomputed cohort table on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CohortSource {
    pub path: PathBuf,
    pub convention: ColumnConvention,
}

impl CohortSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            convention: ColumnConvention::Auto,
        }
    }

    pub fn with_convention(mut self, convention: ColumnConvention) -> Self {
        self.convention = convention;
        self
    }
}

/// Column-addressable rows as read from disk.
#[derive(Debug, Default)]
pub struct RawTable {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl RawTable {
    fn new(headers: Vec<String>) -> Self {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }
}

/// Read `path` according to its extension.
pub fn read_raw(path: &Path) -> Result<RawTable, SourceError> {
    let format = SourceFormat::from_path(path)?;
    if !path.exists() {
        return Err(SourceError::NotFound);
    }
    match format {
        SourceFormat::Csv => read_csv(path),
        SourceFormat::Json => read_json(path),
    }
}

fn read_csv(path: &Path) -> Result<RawTable, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = RawTable::new(headers);

    for record in reader.records() {
        let record = record?;
        let row: Vec<Value> = record
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                }
            })
            .collect();
        table.rows.push(row);
    }
    Ok(table)
}

fn read_json(path: &Path) -> Result<RawTable, SourceError> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    match value {
        Value::Array(rows) => json_records(rows),
        Value::Object(columns) => json_columns(columns),
        _ => Err(SourceError::Malformed(
            "expected an array of rows or an object of columns".to_string(),
        )),
    }
}

fn json_records(rows: Vec<Value>) -> Result<RawTable, SourceError> {
    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let Value::Object(map) = row else {
            return Err(SourceError::Malformed(format!("row {} is not an object", i + 1)));
        };
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(map);
    }

    let mut table = RawTable::new(headers.clone());
    table.rows = objects
        .into_iter()
        .map(|mut map| {
            headers
                .iter()
                .map(|h| map.remove(h).unwrap_or(Value::Null))
                .collect()
        })
        .collect();
    Ok(table)
}

fn json_columns(columns: serde_json::Map<String, Value>) -> Result<RawTable, SourceError> {
    let mut headers = Vec::with_capacity(columns.len());
    let mut values = Vec::with_capacity(columns.len());
    for (name, column) in columns {
        let Value::Array(cells) = column else {
            return Err(SourceError::Malformed(format!("column '{name}' is not an array")));
        };
        headers.push(name);
        values.push(cells);
    }

    let len = values.first().map(Vec::len).unwrap_or(0);
    if let Some(pos) = values.iter().position(|v| v.len() != len) {
        return Err(SourceError::Malformed(format!(
            "column '{}' has {} values, expected {len}",
            headers[pos],
            values[pos].len()
        )));
    }

    let mut table = RawTable::new(headers);
    let mut iters: Vec<_> = values.into_iter().map(Vec::into_iter).collect();
    for _ in 0..len {
        table
            .rows
            .push(iters.iter_mut().map(|it| it.next().unwrap_or(Value::Null)).collect());
    }
    Ok(table)
}
