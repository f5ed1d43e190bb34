//! Manufacturing limits validation - shared library for test data checks
//!
//! Provides:
//! - Key normalization for headers and limit keys
//! - Import of station exports (delimited text, spreadsheets, nested JSON logs)
//! - Limits loading and flattening
//! - Row validation against limits
//! - Profile configuration and end-to-end runs

pub mod config;
pub mod import;
pub mod limits;
pub mod normalize;
pub mod report;
pub mod runner;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ConfigError, LimitsSource, ToolConfig, ValidatorProfile};
pub use import::{
    DelimitedImporter, FormatError, NetworkJsonImporter, ParserKind, Row, RowImporter,
    SpreadsheetImporter,
};
pub use limits::{Bounds, Limit, LimitsError, LimitsRepository, LimitsSet};
pub use normalize::normalize_key;
pub use report::{ReportOutcome, write_report};
pub use runner::{RunError, RunOptions, RunSummary, run_profile};
pub use validation::{
    FieldMap, FieldRole, LimitsValidator, RowShape, ValidationRecord, Violation, validate,
};
