//! Validate command implementation

use std::io::{BufRead, Write};

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::cli::error::CliError;
use crate::cli::menu::{prompt_input_path, select_profile};
use crate::cli::output::{format_json, format_summary};
use crate::config::ToolConfig;
use crate::runner::{RunOptions, run_profile};

/// Handle the validate command, prompting on `input`/`out` for anything not given
pub fn handle_validate<R: BufRead, W: Write>(
    config: &ToolConfig,
    args: &ValidateArgs,
    input: &mut R,
    out: &mut W,
) -> Result<(), CliError> {
    let profile_name = match &args.profile {
        Some(name) => name.clone(),
        None => select_profile(config, input, out)?,
    };
    let profile = config.profile(&profile_name)?;

    let data_file = match &args.input {
        Some(path) => path.clone(),
        None => prompt_input_path(&profile.label, input, out)?,
    };

    let mut options = RunOptions::new(data_file);
    if let Some(path) = &args.output {
        options = options.log_path(path);
    }
    if let Some(rows) = args.skip_rows {
        options = options.skip_rows(rows);
    }

    let summary = run_profile(config, &profile_name, &options)?;

    if args.format == OutputFormat::Json {
        writeln!(out, "{}", format_json(&summary)?)?;
    }
    write!(out, "{}", format_summary(&summary))?;
    Ok(())
}
