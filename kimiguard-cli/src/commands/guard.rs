//! Guard command - decide whether a subagent may be spawned.

use anyhow::Result;
use clap::Args;
use kimiguard_core::{DecisionEngine, ErrorPolicy, UsageRecord};
use kimiguard_store::{PolicyTarget, Settings};
use tracing::{info, warn};

use super::{acquire_record, parse_policy, warn_unknown_class};
use crate::output::{GuardFallbackOutput, GuardOutput, JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the guard command.
#[derive(Args)]
pub struct GuardArgs {
    /// Operation class to check (defaults to the configured guard class).
    #[arg(long, short)]
    pub class: Option<String>,

    /// Policy when usage cannot be checked (fail-open, fail-safe-assume-50).
    #[arg(long, value_parser = parse_policy)]
    pub on_error: Option<ErrorPolicy>,
}

/// Outcome of the guard check.
enum Verdict {
    /// Usage unavailable and the policy allows spawning anyway.
    FailOpen { error: String },
    /// Threshold check ran.
    Checked {
        output: GuardOutput,
        message: String,
    },
}

impl Verdict {
    fn can_spawn(&self) -> bool {
        match self {
            Self::FailOpen { .. } => true,
            Self::Checked { output, .. } => output.can_spawn,
        }
    }
}

/// Runs the guard command.
pub async fn run(args: &GuardArgs, cli: &Cli, settings: &Settings) -> Result<ExitCode> {
    let class = args.class.as_deref().unwrap_or(&settings.guard_class);
    warn_unknown_class(class);

    let policy = args.on_error.unwrap_or(settings.policy_for(PolicyTarget::Guard));
    let record = acquire_record(cli, settings).await;

    let verdict = judge(&record, class, policy, settings);
    info!(can_spawn = verdict.can_spawn(), policy = %policy, "Guard decided");

    match cli.output_format() {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            let line = match &verdict {
                Verdict::FailOpen { error } => formatter.format_guard(
                    true,
                    &format!("could not check usage ({error})"),
                ),
                Verdict::Checked { output, message } => {
                    formatter.format_guard(output.can_spawn, message)
                }
            };
            println!("{line}");
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let json = match &verdict {
                Verdict::FailOpen { error } => formatter.format(&GuardFallbackOutput::new(error))?,
                Verdict::Checked { output, .. } => formatter.format(output)?,
            };
            println!("{json}");
        }
    }

    Ok(if verdict.can_spawn() {
        ExitCode::Success
    } else {
        ExitCode::Blocked
    })
}

fn judge(record: &UsageRecord, class: &str, policy: ErrorPolicy, settings: &Settings) -> Verdict {
    if let (Some(error), ErrorPolicy::FailOpen) = (&record.error, policy) {
        warn!(error = %error, "Usage check failed, allowing spawn");
        return Verdict::FailOpen {
            error: error.clone(),
        };
    }

    let decision = DecisionEngine::new(settings.thresholds, policy).evaluate(record, class);
    Verdict::Checked {
        output: GuardOutput::from_decision(&decision, record),
        message: decision.message,
    }
}
