//! mfg-limits command-line tool
//!
//! Set RUST_LOG=info (or debug) to see what was read and skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mfg_limits::cli::{Cli, args::DEFAULT_CONFIG_FILE, dispatch};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    dispatch(cli, &config_path)?;
    Ok(())
}

/// `config.json` next to the executable
fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.join(DEFAULT_CONFIG_FILE))
}
