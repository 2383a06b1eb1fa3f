//! The nutrition dataset: a header row plus data rows, fetched once at startup.
//!
//! Cells arrive as arbitrary JSON values (the source spreadsheet mixes names and
//! numbers). They are converted to display text once, at load time, so that
//! rendering and keyword search both work on exactly the same strings.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DatasetError;

/// A single table row: the text form of every cell, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Returns true if any cell contains `keyword` as a literal substring.
    pub fn contains(&self, keyword: &str) -> bool {
        self.cells.iter().any(|cell| cell.contains(keyword))
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Deserialize)]
struct RawDataset {
    headers: Vec<String>,
    data: Vec<Vec<Value>>,
}

/// The full, unfiltered `{headers, data}` document.
///
/// Immutable once built; the browser keeps it as the single source of truth and
/// derives filtered views as index lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset, rejecting rows whose length differs from the header row.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Result<Self, DatasetError> {
        let expected = headers.len();
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.cells.len() != expected)
        {
            return Err(DatasetError::RaggedRow {
                index,
                expected,
                found: row.cells.len(),
            });
        }

        Ok(Self { headers, rows })
    }

    /// Parses the JSON document served at the dataset URL.
    pub fn from_json(bytes: &[u8]) -> Result<Self, crate::error::LoadError> {
        let raw: RawDataset = serde_json::from_slice(bytes)?;
        let rows = raw
            .data
            .iter()
            .map(|cells| cells.iter().map(cell_text).collect())
            .collect();

        Ok(Self::new(raw.headers, rows)?)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Converts a JSON cell to the text shown in the table and matched by search.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // 130.0 in the spreadsheet export displays as 130
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
