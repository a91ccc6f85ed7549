//! Preflight command - decide whether an operation should run.

use anyhow::Result;
use clap::Args;
use kimiguard_core::{Decision, DecisionEngine, ErrorPolicy};
use kimiguard_store::{PolicyTarget, Settings};
use tracing::info;

use super::{acquire_record, parse_policy, warn_unknown_class};
use crate::output::{JsonFormatter, PreflightOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the preflight command.
#[derive(Args)]
pub struct PreflightArgs {
    /// Operation class: light, standard or intensive.
    #[arg(default_value = "standard")]
    pub class: String,

    /// Policy when usage cannot be checked (fail-open, fail-safe-assume-50).
    #[arg(long, value_parser = parse_policy)]
    pub on_error: Option<ErrorPolicy>,
}

/// Runs the preflight command.
pub async fn run(args: &PreflightArgs, cli: &Cli, settings: &Settings) -> Result<ExitCode> {
    warn_unknown_class(&args.class);

    let policy = args.on_error.unwrap_or(settings.policy_for(PolicyTarget::Preflight));
    let record = acquire_record(cli, settings).await;

    let decision = DecisionEngine::new(settings.thresholds, policy).evaluate(&record, &args.class);
    info!(level = %decision.level, policy = %policy, "Preflight decided");

    match cli.output_format() {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_decision(&decision));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = PreflightOutput::new(&decision, &record, &args.class);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(exit_code_for(&decision))
}

fn exit_code_for(decision: &Decision) -> ExitCode {
    if decision.proceed {
        ExitCode::Success
    } else {
        ExitCode::Blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kimiguard_core::{ThresholdTable, UsageRecord, parse_snapshot};

    #[test]
    fn test_caution_still_exits_success() {
        let record = parse_snapshot("Weekly usage 80%");
        let decision = DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailOpen)
            .evaluate(&record, "standard");
        assert_eq!(exit_code_for(&decision), ExitCode::Success);
    }

    #[test]
    fn test_blocked_exits_one() {
        let record = parse_snapshot("Weekly usage 95%");
        let decision = DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailOpen)
            .evaluate(&record, "intensive");
        assert_eq!(exit_code_for(&decision), ExitCode::Blocked);
        assert_eq!(ExitCode::Blocked as i32, 1);
    }

    #[test]
    fn test_error_record_under_fail_safe() {
        let record = UsageRecord::failed("Browser not available");
        let decision =
            DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailSafeAssume50)
                .evaluate(&record, "standard");
        assert_eq!(exit_code_for(&decision), ExitCode::Success);
    }
}
