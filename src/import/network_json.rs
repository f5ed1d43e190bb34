//! Network test log reader
//!
//! PoE/network testers write one JSON array per run. Each item is a tested unit
//! with nested tasks, and each task holds the measured sections:
//!
//! ```json
//! [{"SerialNumber": "S1",
//!   "NetworkTasks": [{"TaskSections": [
//!     {"Name": "Tx rate", "Value": "941.2", "IsDataSet": false, "NetworkChartType": "TxLineRateVsTestName"}
//!   ]}]}]
//! ```
//!
//! Every section is flattened into one [`Row`] carrying the unit's serial number.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{FormatError, Row, RowImporter};

/// Field names of the flattened rows
pub const SERIAL_NUMBER: &str = "SerialNumber";
pub const NAME: &str = "Name";
pub const VALUE: &str = "Value";
pub const IS_DATA_SET: &str = "IsDataSet";
pub const NETWORK_CHART_TYPE: &str = "NetworkChartType";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NetworkItem {
    #[serde(default)]
    serial_number: Value,
    #[serde(default)]
    network_tasks: Option<Vec<NetworkTask>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NetworkTask {
    #[serde(default)]
    task_sections: Option<Vec<TaskSection>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TaskSection {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    is_data_set: Value,
    #[serde(default)]
    network_chart_type: Value,
}

/// Reader for nested network test logs (`.txt`/`.json`)
#[derive(Debug, Clone, Default)]
pub struct NetworkJsonImporter;

impl NetworkJsonImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole log document. `source` is only used for error messages.
    pub fn parse(&self, content: &str, source: &Path) -> Result<Vec<Row>, FormatError> {
        let items: Vec<NetworkItem> =
            serde_json::from_str(content).map_err(|e| FormatError::Json {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut rows = Vec::new();
        for item in items {
            // Non-string serials cannot be traced back to a unit.
            let serial = match &item.serial_number {
                Value::String(s) => s.clone(),
                _ => "N/A".to_string(),
            };

            for task in item.network_tasks.unwrap_or_default() {
                for section in task.task_sections.unwrap_or_default() {
                    let mut row = Row::new();
                    row.insert(SERIAL_NUMBER, serial.clone());
                    row.insert(NAME, json_text(&section.name));
                    row.insert(VALUE, json_text(&section.value));
                    row.insert(IS_DATA_SET, flag_text(&section.is_data_set));
                    row.insert(NETWORK_CHART_TYPE, json_text(&section.network_chart_type));
                    rows.push(row);
                }
            }
        }

        Ok(rows)
    }
}

impl RowImporter for NetworkJsonImporter {
    /// Logs have no preamble, so `skip_rows` is ignored.
    fn read(&self, path: &Path, _skip_rows: usize) -> Result<Vec<Row>, FormatError> {
        let content = std::fs::read_to_string(path).map_err(|e| FormatError::io(path, e))?;
        let rows = self.parse(&content, path)?;
        info!(path = %path.display(), rows = rows.len(), "Read network test log");
        Ok(rows)
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn flag_text(value: &Value) -> String {
    match value {
        Value::Null => "false".to_string(),
        other => json_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<Row>, FormatError> {
        NetworkJsonImporter::new().parse(content, Path::new("log.txt"))
    }

    #[test]
    fn test_single_section() {
        let rows = parse(
            r#"[{"SerialNumber":"S1","NetworkTasks":[{"TaskSections":[{"Name":"N","Value":"3","NetworkChartType":"K"}]}]}]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(SERIAL_NUMBER), Some("S1"));
        assert_eq!(rows[0].get(NAME), Some("N"));
        assert_eq!(rows[0].get(VALUE), Some("3"));
        assert_eq!(rows[0].get(IS_DATA_SET), Some("false"));
        assert_eq!(rows[0].get(NETWORK_CHART_TYPE), Some("K"));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let rows = parse(r#"[{"NetworkTasks":[{"TaskSections":[{}]}]}]"#).unwrap();

        assert_eq!(rows[0].get(SERIAL_NUMBER), Some("N/A"));
        assert_eq!(rows[0].get(NAME), Some(""));
        assert_eq!(rows[0].get(VALUE), Some(""));
        assert_eq!(rows[0].get(NETWORK_CHART_TYPE), Some(""));
    }

    #[test]
    fn test_flattens_all_tasks_and_units() {
        let rows = parse(
            r#"[
                {"SerialNumber":"A","NetworkTasks":[
                    {"TaskSections":[{"Name":"a1"},{"Name":"a2"}]},
                    {"TaskSections":[{"Name":"a3"}]}
                ]},
                {"SerialNumber":"B","NetworkTasks":[]},
                {"SerialNumber":"C"},
                {"SerialNumber":"D","NetworkTasks":[{"TaskSections":[{"Name":"d1","IsDataSet":true}]}]}
            ]"#,
        )
        .unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.get(NAME).unwrap()).collect();
        assert_eq!(names, vec!["a1", "a2", "a3", "d1"]);
        assert_eq!(rows[3].get(SERIAL_NUMBER), Some("D"));
        assert_eq!(rows[3].get(IS_DATA_SET), Some("true"));
    }

    #[test]
    fn test_non_string_values() {
        let rows = parse(
            r#"[{"SerialNumber":1234,"NetworkTasks":[{"TaskSections":[{"Name":"n","Value":941.5,"NetworkChartType":null}]}]}]"#,
        )
        .unwrap();

        assert_eq!(rows[0].get(SERIAL_NUMBER), Some("N/A"));
        assert_eq!(rows[0].get(VALUE), Some("941.5"));
        assert_eq!(rows[0].get(NETWORK_CHART_TYPE), Some(""));
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(matches!(parse("[{"), Err(FormatError::Json { .. })));
        assert!(matches!(
            parse(r#"{"SerialNumber":"S1"}"#),
            Err(FormatError::Json { .. })
        ));
    }
}
