//! Profiles command implementation

use crate::cli::error::CliError;
use crate::cli::output::format_profiles;
use crate::config::ToolConfig;

/// Handle the profiles command
pub fn handle_profiles(config: &ToolConfig) -> Result<(), CliError> {
    print!("{}", format_profiles(config));
    Ok(())
}
