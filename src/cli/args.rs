//! CLI argument definitions using clap
//!
//! - mfg-limits profiles                       # list validator profiles
//! - mfg-limits validate                       # pick profile and file interactively
//! - mfg-limits validate -p poe -i run.txt     # non-interactive run

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default configuration file name, looked up next to the executable.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "mfg-limits")]
#[command(about = "Validate manufacturing test data against configured limits")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the configured validator profiles
    Profiles,
    /// Validate a data file against a profile's limits
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Profile name (prompted with a numbered menu if omitted)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Data file to validate (prompted if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Log file to write violations to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Header lines to skip in delimited files (overrides SKIP_ROWS)
    #[arg(long)]
    pub skip_rows: Option<usize>,

    /// Output format for the findings printed on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
