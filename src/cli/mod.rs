//! CLI module for the mfg-limits binary

pub mod args;
pub mod commands;
pub mod error;
pub mod menu;
pub mod output;

pub use args::{Cli, Commands, OutputFormat, ValidateArgs};
pub use error::CliError;

use std::path::Path;

use crate::config::ToolConfig;

/// Load the configuration and run the selected command
pub fn dispatch(cli: Cli, config_path: &Path) -> Result<(), CliError> {
    let config = ToolConfig::load(config_path)?;

    match cli.command {
        Commands::Profiles => commands::profiles::handle_profiles(&config),
        Commands::Validate(args) => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut stdout = std::io::stdout();
            commands::validate::handle_validate(&config, &args, &mut input, &mut stdout)
        }
    }
}
