//! Output formatting for CLI

use crate::config::ToolConfig;
use crate::report::ReportOutcome;
use crate::runner::RunSummary;

use super::error::CliError;

/// Numbered profile listing
pub fn format_profiles(config: &ToolConfig) -> String {
    let mut output = String::new();
    for (index, (name, profile)) in config.profiles().enumerate() {
        output.push_str(&format!("{}. {} ({})\n", index + 1, profile.label, name));
    }
    if output.is_empty() {
        output.push_str("No validator profiles configured.\n");
    }
    output
}

/// Closing message of a run
pub fn format_summary(summary: &RunSummary) -> String {
    let mut output = String::from("-----------\n");
    match &summary.outcome {
        ReportOutcome::Validated => {
            output.push_str("No failed entries were found. Tests are validated!\n");
        }
        ReportOutcome::Written { path, records } => {
            output.push_str(&format!(
                "{} finding(s) in {} row(s), {} out of range.\n",
                records,
                summary.rows,
                summary.out_of_range()
            ));
            output.push_str(&format!(
                "Analysis complete. Results saved in: {}\n",
                path.display()
            ));
        }
    }
    output
}

/// Findings as a JSON array
pub fn format_json(summary: &RunSummary) -> Result<String, CliError> {
    serde_json::to_string_pretty(&summary.records).map_err(|e| CliError::Output(e.to_string()))
}
