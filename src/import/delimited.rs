//! Semicolon-delimited text reader
//!
//! Station exports start with a few preamble lines (tester id, timestamp, ...)
//! before the real header line. Those are discarded before CSV parsing starts.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use super::{FormatError, Row, RowImporter};

const DELIMITER: u8 = b';';

/// Reader for `;`-delimited text files
#[derive(Debug, Clone, Default)]
pub struct DelimitedImporter;

impl DelimitedImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse already-loaded file content.
    ///
    /// The first line left after skipping is the header line; a blank one means
    /// the file has no headers. `source` is only used for error messages.
    pub fn parse(
        &self,
        content: &str,
        skip_rows: usize,
        source: &Path,
    ) -> Result<Vec<Row>, FormatError> {
        let body = skip_lines(content, skip_rows);
        // The csv reader passes over blank lines, which would promote the next
        // data line to header.
        let header_line = body.lines().next().unwrap_or("");
        if header_line.trim().is_empty() {
            return Err(FormatError::NoHeaders(source.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .flexible(true)
            .from_reader(body.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| csv_error(source, e))?
            .clone();
        if headers.is_empty() {
            return Err(FormatError::NoHeaders(source.to_path_buf()));
        }
        debug!(columns = headers.len(), "Parsed delimited header line");

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(source, e))?;
            rows.push(to_row(&headers, &record));
        }

        Ok(rows)
    }
}

impl RowImporter for DelimitedImporter {
    fn read(&self, path: &Path, skip_rows: usize) -> Result<Vec<Row>, FormatError> {
        let content = std::fs::read_to_string(path).map_err(|e| FormatError::io(path, e))?;
        let rows = self.parse(&content, skip_rows, path)?;
        info!(path = %path.display(), rows = rows.len(), skip_rows, "Read delimited file");
        Ok(rows)
    }
}

/// Drop the first `count` lines. Returns an empty slice when the input is shorter.
fn skip_lines(content: &str, count: usize) -> &str {
    let mut rest = content;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

// Short records only carry the leading columns; extra trailing fields are dropped.
fn to_row(headers: &StringRecord, record: &StringRecord) -> Row {
    headers
        .iter()
        .zip(record.iter())
        .collect()
}

fn csv_error(source: &Path, error: csv::Error) -> FormatError {
    FormatError::Csv {
        path: source.to_path_buf(),
        reason: error.to_string(),
    }
}
