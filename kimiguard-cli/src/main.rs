// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! KimiGuard CLI - quota-aware preflight checks for Kimi Code automation.
//!
//! # Examples
//!
//! ```bash
//! # Show weekly and rate-limit usage
//! kimiguard
//!
//! # Gate an intensive job (exit 1 when blocked)
//! kimiguard preflight intensive
//!
//! # Subagent spawn guard, JSON for scripts
//! kimiguard guard --json
//!
//! # Capacity recommendation for cron jobs
//! kimiguard log
//!
//! # Decide from a saved snapshot instead of the browser
//! kimiguard --snapshot console.txt preflight light
//! openclaw browser snapshot --target-id ABC | kimiguard --snapshot - usage
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use kimiguard_store::{LogLevel, Settings, StoreError, default_settings_path};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, guard, log, preflight, usage};

// ============================================================================
// CLI Definition
// ============================================================================

/// KimiGuard CLI - quota-aware preflight checks.
#[derive(Parser)]
#[command(name = "kimiguard")]
#[command(about = "Quota-aware preflight checks for Kimi Code automation")]
#[command(long_about = r#"
KimiGuard reads the Kimi Code console through the OpenClaw browser
extension and decides whether an operation should run.

Operation classes (required remaining weekly quota):
  • light      10%
  • standard   25%
  • intensive  50%

Exit codes:
  0  success / proceed
  1  blocked
  2  error
  3  usage unavailable

Examples:
  kimiguard                        # Usage report
  kimiguard preflight intensive    # Gate an intensive operation
  kimiguard guard --json           # Subagent spawn guard
  kimiguard log                    # Capacity recommendation
"#)]
#[command(version)]
#[command(author = "KimiGuard Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'usage' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Shorthand for --format json.
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Read console snapshot text from a file ("-" for stdin) instead of the browser.
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error text).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Effective output format.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }

    /// Whether text output should carry ANSI colors.
    pub fn use_colors(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }

    /// Settings file path.
    pub fn settings_path(&self) -> PathBuf {
        self.settings.clone().unwrap_or_else(default_settings_path)
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show current usage (default if no command specified).
    #[command(visible_alias = "u")]
    Usage,

    /// Decide whether an operation of a given class should proceed.
    #[command(visible_alias = "p")]
    Preflight(preflight::PreflightArgs),

    /// Decide whether a subagent may be spawned.
    #[command(visible_alias = "g")]
    Guard(guard::GuardArgs),

    /// Print a capacity recommendation for autonomous runs.
    #[command(visible_alias = "l")]
    Log,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success, or the operation may proceed.
    Success = 0,
    /// The operation should not proceed.
    Blocked = 1,
    /// General error.
    Error = 2,
    /// Usage could not be obtained.
    Unavailable = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("kimiguard=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("kimiguard={level}")))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = cli.settings_path();

    let loaded: Result<Settings, StoreError> = Settings::load_from(&settings_path).await;
    let level = loaded.as_ref().map_or(LogLevel::default(), |s| s.log_level);

    setup_logging(cli.verbose, cli.quiet, level);

    let result = match &cli.command {
        Some(Commands::Config(args)) => config::run(args, &cli, loaded, settings_path).await,
        command => match loaded {
            Ok(settings) => match command {
                Some(Commands::Preflight(args)) => preflight::run(args, &cli, &settings).await,
                Some(Commands::Guard(args)) => guard::run(args, &cli, &settings).await,
                Some(Commands::Log) => log::run(&cli, &settings).await,
                _ => usage::run(&cli, &settings).await,
            },
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Failed to load settings from {}", settings_path.display()))),
        },
    };

    match result {
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}
