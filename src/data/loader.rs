// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Loads a delimited student table using the csv crate.
//
// The whole file is read into memory first and the handle is
// dropped before parsing starts. The first row is the schema;
// every later row must have exactly as many fields.
//
// Rows are parsed with `flexible(true)` so a ragged row
// reaches our own check and is reported as SchemaMismatch
// with its line number instead of a generic csv error.

use std::{fs, path::PathBuf};

use crate::domain::dataset::Dataset;
use crate::domain::error::{PrepareError, PrepareResult};
use crate::domain::traits::RecordSource;
use crate::domain::value::{Record, Value};

/// Loads one CSV file. Implements RecordSource.
pub struct CsvLoader {
    path:      PathBuf,
    delimiter: u8,
}

impl CsvLoader {
    /// Comma-delimited loader for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), delimiter: b',' }
    }

    /// The UCI download uses ';' so the delimiter is configurable
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl RecordSource for CsvLoader {
    fn load(&self) -> PrepareResult<Dataset> {
        if !self.path.exists() {
            return Err(PrepareError::SourceNotFound {
                path: self.path.display().to_string(),
            });
        }

        let bytes = fs::read(&self.path)?;
        let dataset = parse_delimited(&bytes, self.delimiter)?;

        tracing::info!(
            "Loaded {} rows x {} fields from '{}'",
            dataset.len(),
            dataset.fields().len(),
            self.path.display()
        );
        Ok(dataset)
    }
}

/// Parse an in-memory delimited table. Header row required.
pub fn parse_delimited(bytes: &[u8], delimiter: u8) -> PrepareResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let fields: Vec<String> = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row  = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() != fields.len() {
            return Err(PrepareError::SchemaMismatch {
                line,
                expected: fields.len(),
                found:    row.len(),
            });
        }
        records.push(Record::at_line(row.iter().map(Value::parse).collect(), line));
    }

    Ok(Dataset::new(fields, records))
}
