//! Spreadsheet reader
//!
//! Reads the first worksheet of an `.xlsx`/`.xls`/`.ods` workbook. The first
//! used row holds the headers, each following row becomes one [`Row`].

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::info;

use super::{FormatError, Row, RowImporter};

/// Reader for workbook files
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetImporter;

impl SpreadsheetImporter {
    pub fn new() -> Self {
        Self
    }

    /// Convert a worksheet range into rows
    pub fn rows_from_range(
        &self,
        range: &Range<Data>,
        source: &Path,
    ) -> Result<Vec<Row>, FormatError> {
        let mut sheet_rows = range.rows();

        let headers: Vec<String> = sheet_rows
            .next()
            .ok_or_else(|| FormatError::NoHeaders(source.to_path_buf()))?
            .iter()
            .map(cell_text)
            .collect();

        let rows = sheet_rows
            .map(|cells| {
                headers
                    .iter()
                    .zip(cells.iter().map(cell_text))
                    .collect::<Row>()
            })
            .collect();

        Ok(rows)
    }
}

impl RowImporter for SpreadsheetImporter {
    /// Workbooks carry their own header row, so `skip_rows` is ignored.
    fn read(&self, path: &Path, _skip_rows: usize) -> Result<Vec<Row>, FormatError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(path, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| FormatError::Spreadsheet {
                path: path.to_path_buf(),
                reason: "workbook contains no worksheets".to_string(),
            })?
            .map_err(|e| spreadsheet_error(path, e))?;

        let rows = self.rows_from_range(&range, path)?;
        info!(path = %path.display(), rows = rows.len(), "Read spreadsheet");
        Ok(rows)
    }
}

/// Render a cell the way the station tooling prints it: whole numbers without
/// a fractional part, booleans capitalized, empty cells as "".
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

fn spreadsheet_error(path: &Path, error: impl std::fmt::Display) -> FormatError {
    FormatError::Spreadsheet {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}
