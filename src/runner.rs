//! End-to-end validation of one input file with one profile
//!
//! Limits are loaded and the parser resolved before the input is read, so a
//! broken profile fails before any rows are touched. Validation itself never
//! fails; only loading and writing can.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, ToolConfig};
use crate::import::{FormatError, ParserKind};
use crate::limits::LimitsError;
use crate::report::{ReportOutcome, write_report};
use crate::validation::{LimitsValidator, ValidationRecord};

/// Fatal errors of a validation run
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Limits(#[from] LimitsError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("{0}")]
    UnknownParser(String),

    #[error("Failed to write validation log {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-run inputs that are not part of the profile
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Data file to validate
    pub input: PathBuf,
    /// Log destination; the configured output directory when `None`
    pub log_path: Option<PathBuf>,
    /// Overrides the configured `SKIP_ROWS`
    pub skip_rows: Option<usize>,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            log_path: None,
            skip_rows: None,
        }
    }

    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = Some(rows);
        self
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub profile: String,
    pub parser: ParserKind,
    /// Rows read from the input
    pub rows: usize,
    /// Rules in the loaded limits set
    pub rules: usize,
    pub records: Vec<ValidationRecord>,
    pub outcome: ReportOutcome,
}

impl RunSummary {
    /// Number of out-of-range findings (as opposed to missing keys/values)
    pub fn out_of_range(&self) -> usize {
        self.records.iter().filter(|r| r.is_out_of_range()).count()
    }
}

/// Validate `options.input` with the profile `profile_name` and write the log
pub fn run_profile(
    config: &ToolConfig,
    profile_name: &str,
    options: &RunOptions,
) -> Result<RunSummary, RunError> {
    let profile = config.profile(profile_name)?;

    let limits = config
        .limits_repository()
        .load(&profile.limits.json, &profile.limits.root)?;
    let parser = profile.parser_kind().map_err(RunError::UnknownParser)?;

    let skip_rows = options.skip_rows.unwrap_or(config.skip_rows);
    let rows = parser.read(&options.input, skip_rows)?;
    let row_count = rows.len();

    info!(
        profile = profile_name,
        parser = %parser,
        rows = row_count,
        rules = limits.len(),
        "Validating"
    );
    let records = LimitsValidator::new(&limits, &profile.fields).validate(rows);

    let log_path = options
        .log_path
        .clone()
        .unwrap_or_else(|| config.output_log());
    let outcome = write_report(&records, &log_path).map_err(|source| RunError::Report {
        path: log_path.clone(),
        source,
    })?;

    Ok(RunSummary {
        profile: profile_name.to_string(),
        parser,
        rows: row_count,
        rules: limits.len(),
        records,
        outcome,
    })
}
