//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::runner::RunError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}
