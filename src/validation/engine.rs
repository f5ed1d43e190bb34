//! Row evaluation against a limits set

use tracing::debug;

use super::field_map::FieldMap;
use super::record::{ValidationRecord, Violation};
use crate::import::Row;
use crate::limits::{Bounds, LimitsSet};
use crate::normalize::normalize_key;

/// How a row is laid out, decided once per row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape<'f, 'r> {
    /// One measurement per row: a rule key field plus a value field
    /// (flattened network logs).
    Keyed {
        key_field: &'f str,
        key: &'r str,
        value: &'r str,
        name: &'r str,
    },
    /// One measurement per column, each column named after its rule
    /// (delimited text and spreadsheets).
    Wide,
}

impl<'f, 'r> RowShape<'f, 'r> {
    /// Keyed when both the key and value roles are present in the row
    pub fn classify(row: &'r Row, fields: &'f FieldMap) -> Self {
        match (fields.key.resolve(row), fields.value.resolve(row)) {
            (Some((key_field, key)), Some((_, value))) => RowShape::Keyed {
                key_field,
                key,
                value,
                name: fields.name.value(row).unwrap_or(""),
            },
            _ => RowShape::Wide,
        }
    }
}

/// Checks rows against a limits set using a profile's field map
#[derive(Debug, Clone, Copy)]
pub struct LimitsValidator<'a> {
    limits: &'a LimitsSet,
    fields: &'a FieldMap,
}

impl<'a> LimitsValidator<'a> {
    pub fn new(limits: &'a LimitsSet, fields: &'a FieldMap) -> Self {
        Self { limits, fields }
    }

    /// Validate rows in order. Row numbers in the records start at 1.
    pub fn validate<I>(&self, rows: I) -> Vec<ValidationRecord>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut records = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            self.validate_row(index + 1, &row, &mut records);
        }
        records
    }

    /// Validate one row, appending findings to `records`
    pub fn validate_row(
        &self,
        row_number: usize,
        row: &Row,
        records: &mut Vec<ValidationRecord>,
    ) {
        let serial = self.fields.serial(row);

        match RowShape::classify(row, self.fields) {
            RowShape::Keyed {
                key_field,
                key,
                value,
                name,
            } => self.check_keyed(row_number, &serial, key_field, key, value, name, records),
            RowShape::Wide => self.check_wide(row_number, &serial, row, records),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_keyed(
        &self,
        row_number: usize,
        serial: &str,
        key_field: &str,
        key: &str,
        value: &str,
        name: &str,
        records: &mut Vec<ValidationRecord>,
    ) {
        if key.is_empty() {
            records.push(ValidationRecord::new(
                row_number,
                serial,
                Violation::MissingKey {
                    field: key_field.to_string(),
                    name: name.to_string(),
                },
            ));
            return;
        }

        if value.is_empty() {
            records.push(ValidationRecord::new(
                row_number,
                serial,
                Violation::MissingValue {
                    label: name.to_string(),
                },
            ));
            return;
        }

        let Some(measured) = parse_number(value) else {
            debug!(row = row_number, key, value, "Skipping non-numeric value");
            return;
        };

        let bounds = self.limits.bounds_for(&normalize_key(key));
        if !bounds.contains(measured) {
            let label = if name.is_empty() { key } else { name };
            records.push(out_of_range(row_number, serial, label, measured, bounds));
        }
    }

    fn check_wide(
        &self,
        row_number: usize,
        serial: &str,
        row: &Row,
        records: &mut Vec<ValidationRecord>,
    ) {
        for (key, bounds) in self.limits.iter() {
            let raw = row.get(key).unwrap_or("");
            if raw.is_empty() {
                records.push(ValidationRecord::new(
                    row_number,
                    serial,
                    Violation::MissingValue {
                        label: key.to_string(),
                    },
                ));
                continue;
            }

            // Some stations export with a decimal comma.
            let Some(measured) = parse_number(&raw.replace(',', ".")) else {
                debug!(row = row_number, key, value = raw, "Skipping non-numeric value");
                continue;
            };

            if !bounds.contains(measured) {
                records.push(out_of_range(row_number, serial, key, measured, bounds));
            }
        }
    }
}

/// Validate `rows` against `limits` using the roles declared in `fields`
pub fn validate<I>(rows: I, limits: &LimitsSet, fields: &FieldMap) -> Vec<ValidationRecord>
where
    I: IntoIterator<Item = Row>,
{
    LimitsValidator::new(limits, fields).validate(rows)
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn out_of_range(
    row_number: usize,
    serial: &str,
    label: &str,
    value: f64,
    bounds: Bounds,
) -> ValidationRecord {
    ValidationRecord::new(
        row_number,
        serial,
        Violation::OutOfRange {
            label: label.to_string(),
            value,
            bounds,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limit;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().copied().collect()
    }

    fn limits(rules: &[(&str, Option<i64>, Option<i64>)]) -> LimitsSet {
        let mut set = LimitsSet::new();
        for (key, low, high) in rules {
            set.insert(key, Bounds::new(low.map(Limit::Integer), high.map(Limit::Integer)));
        }
        set
    }

    #[test]
    fn test_classify_keyed_and_wide() {
        let fields = FieldMap::default();
        let keyed = row(&[("NetworkChartType", "V"), ("Value", "1"), ("Name", "Volt")]);
        assert_eq!(
            RowShape::classify(&keyed, &fields),
            RowShape::Keyed {
                key_field: "NetworkChartType",
                key: "V",
                value: "1",
                name: "Volt",
            }
        );

        let value_only = row(&[("Value", "1")]);
        assert_eq!(RowShape::classify(&value_only, &fields), RowShape::Wide);
    }

    #[test]
    fn test_keyed_missing_key_stops_row() {
        let fields = FieldMap::default();
        let rows = vec![row(&[
            ("SerialNumber", "S1"),
            ("NetworkChartType", ""),
            ("Value", "999"),
            ("Name", "Tx"),
        ])];
        let records = validate(rows, &limits(&[("Tx", Some(0), Some(1))]), &fields);

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].violation,
            Violation::MissingKey {
                field: "NetworkChartType".to_string(),
                name: "Tx".to_string(),
            }
        );
    }

    #[test]
    fn test_keyed_non_numeric_is_skipped() {
        let fields = FieldMap::default();
        let rows = vec![row(&[("NetworkChartType", "V"), ("Value", "PASS")])];
        assert!(validate(rows, &limits(&[("V", Some(0), Some(5))]), &fields).is_empty());
    }

    #[test]
    fn test_keyed_unknown_key_always_passes() {
        let fields = FieldMap::default();
        let rows = vec![row(&[("NetworkChartType", "Unknown"), ("Value", "1e9")])];
        assert!(validate(rows, &limits(&[("V", Some(0), Some(5))]), &fields).is_empty());
    }

    #[test]
    fn test_keyed_label_falls_back_to_key() {
        let fields = FieldMap::default();
        let rows = vec![row(&[("NetworkChartType", "V"), ("Value", "-1"), ("Name", "")])];
        let records = validate(rows, &limits(&[("V", Some(0), None)]), &fields);

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].to_string(),
            "[Row 1 | SN: N/A] ❌ 'V' = -1.0 (Out of range: 0–∞)"
        );
    }

    #[test]
    fn test_wide_missing_value_does_not_abort_row() {
        let fields = FieldMap::default();
        let rows = vec![row(&[("A", ""), ("C", "9")])];
        let records = validate(
            rows,
            &limits(&[
                ("A", Some(0), Some(5)),
                ("B", Some(0), Some(5)),
                ("C", Some(0), Some(5)),
            ]),
            &fields,
        );

        let lines: Vec<String> = records.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "[Row 1 | SN: N/A] Missing value for 'A'",
                "[Row 1 | SN: N/A] Missing value for 'B'",
                "[Row 1 | SN: N/A] ❌ 'C' = 9.0 (Out of range: 0–5)",
            ]
        );
    }

    #[test]
    fn test_wide_non_numeric_is_skipped() {
        let fields = FieldMap::default();
        let rows = vec![row(&[("A", "n/a"), ("B", "  ")])];
        let records = validate(
            rows,
            &limits(&[("A", Some(0), Some(5)), ("B", Some(0), Some(5))]),
            &fields,
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_row_numbers_follow_input_order() {
        let fields = FieldMap::default();
        let rows = vec![
            row(&[("SerialNumber", "S1"), ("A", "1")]),
            row(&[("SerialNumber", "S2"), ("A", "6")]),
            row(&[("SerialNumber", "S3"), ("A", "7")]),
        ];
        let records = validate(rows, &limits(&[("A", Some(0), Some(5))]), &fields);

        let positions: Vec<_> = records.iter().map(|r| (r.row, r.serial.as_str())).collect();
        assert_eq!(positions, vec![(2, "S2"), (3, "S3")]);
    }

    #[test]
    fn test_empty_limits_wide_row_has_no_findings() {
        let fields = FieldMap::default();
        let rows = vec![row(&[("A", "100")])];
        assert!(validate(rows, &LimitsSet::new(), &fields).is_empty());
    }
}
