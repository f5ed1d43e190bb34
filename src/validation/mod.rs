//! Validation functionality
//!
//! Checks imported rows against a flattened limits set:
//! - Keyed rows (one measurement per row) look up their own rule key
//! - Wide rows (one measurement per column) are checked against every rule
//!
//! Findings are plain records; a run never fails because of them.

pub mod engine;
pub mod field_map;
pub mod record;

pub use engine::{LimitsValidator, RowShape, validate};
pub use field_map::{FieldMap, FieldRole};
pub use record::{ValidationRecord, Violation};
