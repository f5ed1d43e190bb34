//! Field roles
//!
//! A validator profile tells the engine which row fields hold the serial
//! number, the rule key, the measured value and the display name. Each role is
//! either one field name or an ordered list of candidates; the first candidate
//! present in a row is used.

use serde::Deserialize;

use crate::import::Row;
use crate::normalize::normalize_key;

/// How a role is written in the configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FieldSpec {
    One(String),
    Many(Vec<String>),
}

/// Ordered candidate field names for one role
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "FieldSpec")]
pub struct FieldRole {
    candidates: Vec<String>,
}

impl From<FieldSpec> for FieldRole {
    fn from(spec: FieldSpec) -> Self {
        match spec {
            FieldSpec::One(name) => FieldRole::single(&name),
            FieldSpec::Many(names) => FieldRole::new(names),
        }
    }
}

impl FieldRole {
    /// Candidates are normalized so they match normalized row keys.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            candidates: names.into_iter().map(|n| normalize_key(n.as_ref())).collect(),
        }
    }

    pub fn single(name: &str) -> Self {
        Self::new([name])
    }

    /// First candidate present in `row`, as `(field name, value)`
    pub fn resolve<'s, 'r>(&'s self, row: &'r Row) -> Option<(&'s str, &'r str)> {
        self.candidates
            .iter()
            .find_map(|c| row.get(c).map(|value| (c.as_str(), value)))
    }

    /// Value of the first present candidate
    pub fn value<'r>(&self, row: &'r Row) -> Option<&'r str> {
        self.resolve(row).map(|(_, value)| value)
    }
}

/// Which row fields play the serial / key / value / name roles
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub serial: FieldRole,
    pub key: FieldRole,
    pub value: FieldRole,
    pub name: FieldRole,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            serial: FieldRole::single("SerialNumber"),
            key: FieldRole::single("NetworkChartType"),
            value: FieldRole::single("Value"),
            name: FieldRole::single("Name"),
        }
    }
}

impl FieldMap {
    /// Serial number of a row; `N/A` when missing or empty
    pub fn serial(&self, row: &Row) -> String {
        match self.serial.value(row) {
            Some(serial) if !serial.is_empty() => serial.trim().to_string(),
            _ => "N/A".to_string(),
        }
    }
}
