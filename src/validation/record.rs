//! Validation findings

use std::fmt;

use serde::Serialize;

use crate::limits::{Bounds, format_measurement};

/// What went wrong for one field of one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The row's rule key field is empty
    MissingKey { field: String, name: String },
    /// A governed value is absent or empty
    MissingValue { label: String },
    /// A numeric value falls outside its bounds
    OutOfRange {
        label: String,
        value: f64,
        bounds: Bounds,
    },
}

/// One finding, tied back to its input row and tested unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRecord {
    /// 1-based position in the row sequence
    pub row: usize,
    pub serial: String,
    #[serde(flatten)]
    pub violation: Violation,
}

impl ValidationRecord {
    pub fn new(row: usize, serial: impl Into<String>, violation: Violation) -> Self {
        Self {
            row,
            serial: serial.into(),
            violation,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self.violation, Violation::OutOfRange { .. })
    }
}

impl fmt::Display for ValidationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Row {} | SN: {}] ", self.row, self.serial)?;
        match &self.violation {
            Violation::MissingKey { field, name } => {
                write!(f, "Missing key '{}' (Name: '{}')", field, name)
            }
            Violation::MissingValue { label } => write!(f, "Missing value for '{}'", label),
            Violation::OutOfRange {
                label,
                value,
                bounds,
            } => write!(
                f,
                "❌ '{}' = {} (Out of range: {})",
                label,
                format_measurement(*value),
                bounds
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limit;

    #[test]
    fn test_display_out_of_range() {
        let record = ValidationRecord::new(
            3,
            "S1",
            Violation::OutOfRange {
                label: "Voltage".to_string(),
                value: 5.2,
                bounds: Bounds::new(Some(Limit::Integer(0)), Some(Limit::Integer(5))),
            },
        );
        assert_eq!(
            record.to_string(),
            "[Row 3 | SN: S1] ❌ 'Voltage' = 5.2 (Out of range: 0–5)"
        );
    }

    #[test]
    fn test_display_missing() {
        let missing_key = ValidationRecord::new(
            1,
            "N/A",
            Violation::MissingKey {
                field: "NetworkChartType".to_string(),
                name: "Tx rate".to_string(),
            },
        );
        assert_eq!(
            missing_key.to_string(),
            "[Row 1 | SN: N/A] Missing key 'NetworkChartType' (Name: 'Tx rate')"
        );

        let missing_value = ValidationRecord::new(
            2,
            "S9",
            Violation::MissingValue {
                label: "Gain".to_string(),
            },
        );
        assert_eq!(
            missing_value.to_string(),
            "[Row 2 | SN: S9] Missing value for 'Gain'"
        );
    }

    #[test]
    fn test_display_large_value_and_float_bounds() {
        let record = ValidationRecord::new(
            1,
            "S1",
            Violation::OutOfRange {
                label: "A".to_string(),
                value: 1e16,
                bounds: Bounds::new(Some(Limit::Float(0.0)), Some(Limit::Float(5.0))),
            },
        );
        assert_eq!(
            record.to_string(),
            "[Row 1 | SN: S1] ❌ 'A' = 1e+16 (Out of range: 0.0–5.0)"
        );
    }

    #[test]
    fn test_serialize_json() {
        let record = ValidationRecord::new(
            4,
            "S2",
            Violation::MissingValue {
                label: "B".to_string(),
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"row": 4, "serial": "S2", "kind": "missing_value", "label": "B"})
        );
    }
}
