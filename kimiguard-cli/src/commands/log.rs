//! Log command - capacity recommendation for autonomous runs.

use anyhow::Result;
use kimiguard_store::Settings;
use tracing::info;

use super::acquire_record;
use crate::output::{JsonFormatter, LogOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the log command. Always succeeds; the recommendation carries the verdict.
pub async fn run(cli: &Cli, settings: &Settings) -> Result<ExitCode> {
    let record = acquire_record(cli, settings).await;
    let output = LogOutput::new(&record);
    info!(tier = ?output.tier, "Capacity recommendation");

    match cli.output_format() {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_recommendation(output.tier));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
