//! Interactive prompts
//!
//! Operators usually start the tool without arguments, pick a profile by
//! number and drag the data file into the terminal window.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::error::CliError;
use crate::config::ToolConfig;

/// Show the numbered profile menu and return the chosen profile's name
pub fn select_profile<R: BufRead, W: Write>(
    config: &ToolConfig,
    input: &mut R,
    out: &mut W,
) -> Result<String, CliError> {
    let count = config.validators.len();
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "No validator profiles configured".to_string(),
        ));
    }

    writeln!(out, "Please select one of the options:")?;
    for (index, (_, profile)) in config.profiles().enumerate() {
        writeln!(out, "{}. {}", index + 1, profile.label)?;
    }
    write!(out, "Enter 1-{}: ", count)?;
    out.flush()?;

    let choice = read_line(input)?;
    choice
        .parse::<usize>()
        .ok()
        .and_then(|position| config.profile_at(position))
        .map(|(name, _)| name.to_string())
        .ok_or(CliError::InvalidChoice(choice))
}

/// Ask for the data file path
pub fn prompt_input_path<R: BufRead, W: Write>(
    label: &str,
    input: &mut R,
    out: &mut W,
) -> Result<PathBuf, CliError> {
    write!(out, "Drop the path to the {} file: ", label)?;
    out.flush()?;

    let path = clean_dropped_path(&read_line(input)?);
    if path.as_os_str().is_empty() {
        return Err(CliError::InvalidArgument("No input file given".to_string()));
    }
    Ok(path)
}

/// Terminals wrap dragged paths containing spaces in double quotes.
pub fn clean_dropped_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().trim_matches('"'))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, CliError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
