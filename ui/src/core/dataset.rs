//! Dataset loading: CSV text → raw rows → normalized, shared, read-only records.

use std::sync::Arc;

use dioxus::logger::tracing::info;
use thiserror::Error;

use super::record::{columns, normalize, RawRow, Record};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("dataset is empty")]
    Empty,
    #[error("couldn't fetch dataset: {0}")]
    Fetch(String),
}

/// Parses delimited text with a header row into header-keyed rows.
///
/// Short or long rows are tolerated (missing cells read as absent); a file that has no header
/// or lacks one of the required columns fails as a whole.
pub fn parse_csv(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::Empty);
    }
    for required in columns::REQUIRED {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Immutable, cheaply clonable record set established once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Arc<[Record]>,
    dropped_rows: usize,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            records: Vec::new().into(),
            dropped_rows: 0,
        }
    }
}

impl Dataset {
    pub fn from_rows(rows: &[RawRow]) -> Self {
        let records = normalize(rows);
        let dropped_rows = rows.len() - records.len();
        Self {
            records: records.into(),
            dropped_rows,
        }
    }

    pub fn from_csv_text(text: &str) -> Result<Self, LoadError> {
        let rows = parse_csv(text)?;
        let dataset = Self::from_rows(&rows);
        info!(
            records = dataset.len(),
            dropped = dataset.dropped_rows,
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows discarded by the normalizer.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }
}
