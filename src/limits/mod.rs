//! Limits loading
//!
//! A limits document groups rules into sections under one or more root keys:
//!
//! ```json
//! {"poe": [{"limits": [{"key": "TxLineRateVsTestName", "lowerLimit": 900, "upperLimit": null}]}]}
//! ```
//!
//! Loading one root key flattens all of its sections into a [`LimitsSet`].

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::normalize::normalize_key;

/// Errors raised while loading limits
#[derive(Error, Debug)]
pub enum LimitsError {
    /// Limits file does not exist
    #[error("Limits file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read limits file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error in limits file: {0}")]
    Json(String),

    /// Document or section has an unexpected shape
    #[error("Invalid limits structure: {0}")]
    InvalidStructure(String),
}

impl From<serde_json::Error> for LimitsError {
    fn from(e: serde_json::Error) -> Self {
        LimitsError::Json(e.to_string())
    }
}

/// One bound as the limits document wrote it.
///
/// `5` and `5.0` compare the same but render differently in the log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Limit {
    Integer(i64),
    Float(f64),
}

impl Limit {
    pub fn value(&self) -> f64 {
        match *self {
            Limit::Integer(value) => value as f64,
            Limit::Float(value) => value,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Limit::Integer(value) => write!(f, "{}", value),
            Limit::Float(value) => f.write_str(&format_measurement(value)),
        }
    }
}

/// Lower/upper bound pair. An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub lower_limit: Option<Limit>,
    pub upper_limit: Option<Limit>,
}

impl Bounds {
    pub fn new(lower_limit: Option<Limit>, upper_limit: Option<Limit>) -> Self {
        Self {
            lower_limit,
            upper_limit,
        }
    }

    /// Whether `value` lies inside the bounds. Bounds themselves are inclusive.
    pub fn contains(&self, value: f64) -> bool {
        let below = self.lower_limit.is_some_and(|low| value < low.value());
        let above = self.upper_limit.is_some_and(|high| value > high.value());
        !below && !above
    }
}

/// Renders as `low–high`, with `-∞` / `∞` for absent bounds.
impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower_limit {
            Some(low) => write!(f, "{}", low)?,
            None => f.write_str("-∞")?,
        }
        f.write_str("–")?;
        match self.upper_limit {
            Some(high) => write!(f, "{}", high),
            None => f.write_str("∞"),
        }
    }
}

/// Shortest text that reads back as `value`, always marked as a float:
/// `7.0`, `0.25`, `1e+16`, `1.5e-05`, `inf`.
pub fn format_measurement(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if value != 0.0 && !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// One entry of a section's `limits` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LimitRule {
    key: String,
    #[serde(default)]
    lower_limit: Option<Limit>,
    #[serde(default)]
    upper_limit: Option<Limit>,
}

impl LimitRule {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.lower_limit, self.upper_limit)
    }
}

#[derive(Debug, Deserialize)]
struct LimitSection {
    #[serde(default)]
    limits: Option<Vec<LimitRule>>,
}

/// Flattened rules keyed by normalized key, in first-seen order.
///
/// Inserting an existing key replaces its bounds but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LimitsSet {
    rules: IndexMap<String, Bounds>,
}

impl LimitsSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule under its normalized key (last one wins)
    pub fn insert(&mut self, key: &str, bounds: Bounds) {
        self.rules.insert(normalize_key(key), bounds);
    }

    /// Bounds for `key`, if a rule exists
    pub fn get(&self, key: &str) -> Option<Bounds> {
        self.rules.get(key).copied()
    }

    /// Bounds for `key`, unbounded when no rule exists
    pub fn bounds_for(&self, key: &str) -> Bounds {
        self.get(key).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Bounds)> {
        self.rules.iter().map(|(k, b)| (k.as_str(), *b))
    }

    /// Flatten the sections found under `root_key` of a parsed limits document.
    ///
    /// A missing root key, or sections without `limits`, contribute nothing.
    pub fn from_document(document: &Value, root_key: &str) -> Result<Self, LimitsError> {
        let root = document.as_object().ok_or_else(|| {
            LimitsError::InvalidStructure("expected an object at the document root".to_string())
        })?;

        let mut set = LimitsSet::new();
        let Some(sections) = root.get(root_key) else {
            warn!(root_key, "Root key not present in limits document");
            return Ok(set);
        };

        let sections: Vec<LimitSection> = serde_json::from_value(sections.clone())
            .map_err(|e| LimitsError::InvalidStructure(format!("'{}': {}", root_key, e)))?;

        for section in sections {
            for rule in section.limits.unwrap_or_default() {
                set.insert(&rule.key, rule.bounds());
            }
        }

        Ok(set)
    }
}

/// Loads limits files, resolving relative paths against a base directory
#[derive(Debug, Clone)]
pub struct LimitsRepository {
    base_dir: PathBuf,
}

impl LimitsRepository {
    /// Create a repository rooted at `base_dir` (usually the configuration file's directory)
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Absolute paths are kept, relative ones are joined onto the base directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Load and flatten the rules stored under `root_key` in the file at `path`
    pub fn load(&self, path: &Path, root_key: &str) -> Result<LimitsSet, LimitsError> {
        let path = self.resolve(path);
        if !path.exists() {
            return Err(LimitsError::NotFound(path));
        }

        let content = std::fs::read_to_string(&path).map_err(|source| LimitsError::Io {
            path: path.clone(),
            source,
        })?;
        let document: Value = serde_json::from_str(&content)?;
        let set = LimitsSet::from_document(&document, root_key)?;

        info!(path = %path.display(), root_key, rules = set.len(), "Loaded limits");
        Ok(set)
    }
}
