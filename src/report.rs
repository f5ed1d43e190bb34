//! Violation log output
//!
//! Nothing is written for a clean run. Otherwise every record becomes one line
//! of the log, replacing whatever the file held before.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::validation::ValidationRecord;

/// What [`write_report`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No records; no file was touched
    Validated,
    /// Records were written to `path`
    Written { path: PathBuf, records: usize },
}

/// Join records into the log text, one record per line
pub fn render_report(records: &[ValidationRecord]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `records` to `log_path`, creating its parent directory when needed
pub fn write_report(
    records: &[ValidationRecord],
    log_path: &Path,
) -> std::io::Result<ReportOutcome> {
    if records.is_empty() {
        return Ok(ReportOutcome::Validated);
    }

    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(log_path, render_report(records))?;

    info!(path = %log_path.display(), records = records.len(), "Wrote validation log");
    Ok(ReportOutcome::Written {
        path: log_path.to_path_buf(),
        records: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violation;

    fn missing(row: usize, label: &str) -> ValidationRecord {
        ValidationRecord::new(
            row,
            "S1",
            Violation::MissingValue {
                label: label.to_string(),
            },
        )
    }

    #[test]
    fn test_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("out").join("validation_results.txt");

        let outcome = write_report(&[], &log).unwrap();
        assert_eq!(outcome, ReportOutcome::Validated);
        assert!(!log.exists());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_one_line_per_record_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("nested").join("dir").join("log.txt");

        write_report(&[missing(1, "A"), missing(1, "B"), missing(2, "A")], &log).unwrap();
        let content = std::fs::read_to_string(&log).unwrap();
        assert_eq!(content.lines().count(), 3);

        let outcome = write_report(&[missing(5, "Z")], &log).unwrap();
        assert_eq!(
            outcome,
            ReportOutcome::Written {
                path: log.clone(),
                records: 1
            }
        );
        assert_eq!(
            std::fs::read_to_string(&log).unwrap(),
            "[Row 5 | SN: S1] Missing value for 'Z'"
        );
    }
}
