//! Import functionality
//!
//! Provides readers that turn test-station exports into flat [`Row`]s:
//! - Delimited text (semicolon separated, with a configurable preamble)
//! - Spreadsheets (first worksheet, first row as headers)
//! - Nested JSON network test logs (`item -> NetworkTasks -> TaskSections`)
//!
//! Every key placed in a [`Row`] goes through [`normalize_key`]. Values are kept
//! as text; numeric interpretation is left to the validation engine.

pub mod delimited;
pub mod network_json;
pub mod spreadsheet;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::normalize::normalize_key;

pub use delimited::DelimitedImporter;
pub use network_json::NetworkJsonImporter;
pub use spreadsheet::SpreadsheetImporter;

/// One normalized input record: field name -> text value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. The key is normalized; a repeated key replaces the earlier value.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(normalize_key(key), value.into());
    }

    /// Value stored under an already-normalized key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key.as_ref(), value);
        }
        row
    }
}

/// Errors raised while reading an input file
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No headers found in {0}")]
    NoHeaders(PathBuf),

    #[error("CSV error in {path}: {reason}")]
    Csv { path: PathBuf, reason: String },

    #[error("Error decoding JSON from {path}: {reason}")]
    Json { path: PathBuf, reason: String },

    #[error("Spreadsheet error in {path}: {reason}")]
    Spreadsheet { path: PathBuf, reason: String },
}

impl FormatError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        FormatError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A reader producing rows from one input file
pub trait RowImporter {
    /// Read `path` into rows. Readers whose format is self-describing ignore `skip_rows`.
    fn read(&self, path: &Path, skip_rows: usize) -> Result<Vec<Row>, FormatError>;
}

/// Parser names accepted in a validator profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParserKind {
    /// `parse_csv`
    Delimited,
    /// `parse_xlsx`
    Spreadsheet,
    /// `parse_txt_json_array`
    NetworkJson,
}

impl ParserKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParserKind::Delimited => "parse_csv",
            ParserKind::Spreadsheet => "parse_xlsx",
            ParserKind::NetworkJson => "parse_txt_json_array",
        }
    }

    /// Read `path` with the adapter for this parser
    pub fn read(&self, path: &Path, skip_rows: usize) -> Result<Vec<Row>, FormatError> {
        match self {
            ParserKind::Delimited => DelimitedImporter::new().read(path, skip_rows),
            ParserKind::Spreadsheet => SpreadsheetImporter::new().read(path, skip_rows),
            ParserKind::NetworkJson => NetworkJsonImporter::new().read(path, skip_rows),
        }
    }
}

impl std::str::FromStr for ParserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse_csv" => Ok(ParserKind::Delimited),
            "parse_xlsx" => Ok(ParserKind::Spreadsheet),
            "parse_txt_json_array" => Ok(ParserKind::NetworkJson),
            _ => Err(format!("No parser function found for '{}'", s)),
        }
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
