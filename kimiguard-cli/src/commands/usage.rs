//! Usage command - fetch and display the usage record.

use anyhow::Result;
use kimiguard_core::UsageRecord;
use kimiguard_store::Settings;
use tracing::info;

use super::acquire_record;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the usage command.
pub async fn run(cli: &Cli, settings: &Settings) -> Result<ExitCode> {
    let record = acquire_record(cli, settings).await;
    info!(error = ?record.error, "Usage fetched");

    output_record(&record, cli)?;

    Ok(exit_code_for(&record))
}

fn output_record(record: &UsageRecord, cli: &Cli) -> Result<()> {
    match cli.output_format() {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_usage(record));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(record)?);
        }
    }
    Ok(())
}

fn exit_code_for(record: &UsageRecord) -> ExitCode {
    if record.is_error() {
        ExitCode::Unavailable
    } else {
        ExitCode::Success
    }
}
