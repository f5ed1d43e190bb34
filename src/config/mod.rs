//! Tool configuration
//!
//! `config.json` declares the validator profiles offered to the operator:
//!
//! ```json
//! {
//!   "SKIP_ROWS": 3,
//!   "VALIDATORS": {
//!     "mic": {
//!       "label": "Microphone line test",
//!       "parser": "parse_csv",
//!       "limits": {"json": "limits/mic.json", "root": "mic"}
//!     }
//!   }
//! }
//! ```
//!
//! Relative paths inside the document resolve against the directory holding it.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::import::ParserKind;
use crate::limits::LimitsRepository;
use crate::validation::FieldMap;

/// Header lines skipped in delimited files unless the config says otherwise
pub const DEFAULT_SKIP_ROWS: usize = 3;

/// Output directory used when `OUTPUT_DIR` is not set
pub const DEFAULT_OUTPUT_DIR: &str = "extracted";

/// File name of the violation log inside the output directory
pub const LOG_FILE_NAME: &str = "validation_results.txt";

/// Errors raised while loading or querying the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file '{0}' not found.")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Json(String),

    #[error("Unknown validator profile: {0}")]
    UnknownProfile(String),
}

/// Where a profile's limits come from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsSource {
    /// Limits document, relative to the config directory unless absolute
    pub json: PathBuf,
    /// Root key selecting the sections to flatten
    pub root: String,
}

/// One named validator the operator can pick
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorProfile {
    /// Shown in menus and prompts
    pub label: String,
    /// Parser name, e.g. `parse_csv`
    pub parser: String,
    pub limits: LimitsSource,
    #[serde(default)]
    pub fields: FieldMap,
}

impl ValidatorProfile {
    /// Resolve the parser name to an adapter
    pub fn parser_kind(&self) -> Result<ParserKind, String> {
        self.parser.parse()
    }
}

fn default_skip_rows() -> usize {
    DEFAULT_SKIP_ROWS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Parsed `config.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    #[serde(rename = "SKIP_ROWS", default = "default_skip_rows")]
    pub skip_rows: usize,

    #[serde(rename = "OUTPUT_DIR", default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Profiles in document order
    #[serde(rename = "VALIDATORS", default)]
    pub validators: IndexMap<String, ValidatorProfile>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl ToolConfig {
    /// Load the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let config = Self::parse(&content, base_dir)?;

        info!(
            path = %path.display(),
            profiles = config.validators.len(),
            skip_rows = config.skip_rows,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration content; relative paths will resolve against `base_dir`
    pub fn parse(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config: ToolConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.base_dir = base_dir.into();
        Ok(config)
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&ValidatorProfile, ConfigError> {
        self.validators
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    /// Look up a profile by its 1-based menu position
    pub fn profile_at(&self, position: usize) -> Option<(&str, &ValidatorProfile)> {
        position
            .checked_sub(1)
            .and_then(|index| self.validators.get_index(index))
            .map(|(name, profile)| (name.as_str(), profile))
    }

    /// Profiles in menu order
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &ValidatorProfile)> {
        self.validators
            .iter()
            .map(|(name, profile)| (name.as_str(), profile))
    }

    /// Repository resolving limits files against the config directory
    pub fn limits_repository(&self) -> LimitsRepository {
        LimitsRepository::new(&self.base_dir)
    }

    /// Default location of the violation log
    pub fn output_log(&self) -> PathBuf {
        let dir = if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            self.base_dir.join(&self.output_dir)
        };
        dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldRole;

    const CONFIG: &str = r#"{
        "SKIP_ROWS": 2,
        "VALIDATORS": {
            "poe": {
                "label": "PoE network test",
                "parser": "parse_txt_json_array",
                "limits": {"json": "limits/poe.json", "root": "poe"}
            },
            "mic": {
                "label": "Mic line test",
                "parser": "parse_csv",
                "limits": {"json": "/abs/mic.json", "root": "mic"},
                "fields": {"serial": ["SN", "Serial Number"]}
            }
        }
    }"#;

    #[test]
    fn test_parse_profiles_in_order() {
        let config = ToolConfig::parse(CONFIG, "/opt/station").unwrap();

        assert_eq!(config.skip_rows, 2);
        let names: Vec<_> = config.profiles().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["poe", "mic"]);

        let mic = config.profile("mic").unwrap();
        assert_eq!(mic.parser_kind().unwrap(), ParserKind::Delimited);
        assert_eq!(mic.fields.serial, FieldRole::new(["SN", "Serial Number"]));
        assert_eq!(mic.fields.value, FieldRole::single("Value"));
    }

    #[test]
    fn test_defaults() {
        let config = ToolConfig::parse("{}", "/opt/station").unwrap();
        assert_eq!(config.skip_rows, DEFAULT_SKIP_ROWS);
        assert!(config.validators.is_empty());
        assert_eq!(
            config.output_log(),
            PathBuf::from("/opt/station/extracted/validation_results.txt")
        );
    }

    #[test]
    fn test_profile_at_is_one_based() {
        let config = ToolConfig::parse(CONFIG, ".").unwrap();
        assert_eq!(config.profile_at(1).map(|(name, _)| name), Some("poe"));
        assert_eq!(config.profile_at(2).map(|(name, _)| name), Some("mic"));
        assert!(config.profile_at(0).is_none());
        assert!(config.profile_at(3).is_none());
    }

    #[test]
    fn test_unknown_profile() {
        let config = ToolConfig::parse(CONFIG, ".").unwrap();
        assert!(matches!(
            config.profile("nope"),
            Err(ConfigError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_unknown_parser_only_fails_on_use() {
        let config = ToolConfig::parse(
            r#"{"VALIDATORS": {"x": {"label": "X", "parser": "parse_pdf", "limits": {"json": "l.json", "root": "x"}}}}"#,
            ".",
        )
        .unwrap();
        assert!(config.profile("x").unwrap().parser_kind().is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ToolConfig::load(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_sets_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, CONFIG).unwrap();

        let config = ToolConfig::load(&path).unwrap();
        assert_eq!(
            config
                .limits_repository()
                .resolve(&config.profile("poe").unwrap().limits.json),
            dir.path().join("limits/poe.json")
        );
    }
}
