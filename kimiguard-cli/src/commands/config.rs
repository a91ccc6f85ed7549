//! Config command - manage configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use kimiguard_core::{ErrorPolicy, OperationClass};
use kimiguard_store::{PolicyTarget, Settings, SettingsStore, StoreError, default_config_dir};
use std::path::{Path, PathBuf};
use tracing::info;

use super::parse_policy;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Reset to defaults.
    Reset,

    /// Set the required remaining percent for an operation class.
    SetThreshold {
        /// Operation class: light, standard or intensive.
        class: String,
        /// Required remaining weekly quota, 0-100.
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },

    /// Set the error policy for a command.
    SetPolicy {
        /// Command the policy applies to.
        command: PolicyCommand,
        /// fail-open or fail-safe-assume-50.
        #[arg(value_parser = parse_policy)]
        policy: ErrorPolicy,
    },
}

/// Commands with a configurable error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyCommand {
    /// The preflight command.
    Preflight,
    /// The guard command.
    Guard,
}

impl PolicyCommand {
    fn as_str(self) -> &'static str {
        match self {
            Self::Preflight => "preflight",
            Self::Guard => "guard",
        }
    }
}

impl From<PolicyCommand> for PolicyTarget {
    fn from(command: PolicyCommand) -> Self {
        match command {
            PolicyCommand::Preflight => PolicyTarget::Preflight,
            PolicyCommand::Guard => PolicyTarget::Guard,
        }
    }
}

/// Runs the config command.
///
/// `loaded` is the result of reading the settings file; `path` and `reset`
/// work even when that failed.
pub async fn run(
    args: &ConfigArgs,
    cli: &Cli,
    loaded: Result<Settings, StoreError>,
    path: PathBuf,
) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Path => show_paths(cli, &path)?,
        ConfigAction::Reset => reset_config(&path).await?,
        action => {
            let settings = loaded
                .with_context(|| format!("Failed to load settings from {}", path.display()))?;
            let mut store = SettingsStore::new(settings, path);
            match action {
                ConfigAction::SetThreshold { class, percent } => {
                    set_threshold(&mut store, class, *percent).await?;
                }
                ConfigAction::SetPolicy { command, policy } => {
                    set_policy(&mut store, *command, *policy).await?;
                }
                _ => show_config(cli, &store)?,
            }
        }
    }
    Ok(ExitCode::Success)
}

fn show_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    match cli.output_format() {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_settings(store.get(), store.path()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(store.get())?);
        }
    }
    Ok(())
}

fn show_paths(cli: &Cli, settings_path: &Path) -> Result<()> {
    let config_dir = default_config_dir();

    match cli.output_format() {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }
    Ok(())
}

async fn set_threshold(store: &mut SettingsStore, class: &str, percent: u8) -> Result<()> {
    let class = OperationClass::parse(class).with_context(|| {
        format!("Unknown operation class: {class}. Use: light, standard, intensive")
    })?;

    store.update(|s| s.thresholds.set(class, percent))?;
    store.save().await?;

    info!(class = %class, percent, "Threshold updated");
    println!("{class} threshold set to {percent}% remaining");
    Ok(())
}

async fn set_policy(
    store: &mut SettingsStore,
    command: PolicyCommand,
    policy: ErrorPolicy,
) -> Result<()> {
    store.update(|s| s.set_policy(command.into(), policy))?;
    store.save().await?;

    info!(policy = %policy, "Error policy updated");
    println!("{} error policy set to {policy}", command.as_str());
    Ok(())
}

async fn reset_config(path: &Path) -> Result<()> {
    if path.exists() {
        tokio::fs::remove_file(path).await?;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_threshold_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = SettingsStore::new(Settings::default(), path.clone());

        set_threshold(&mut store, "Intensive", 65).await.unwrap();

        let reloaded = Settings::load_from(&path).await.unwrap();
        assert_eq!(reloaded.thresholds.intensive, 65);
    }

    #[tokio::test]
    async fn test_set_threshold_unknown_class() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::new(Settings::default(), dir.path().join("settings.json"));

        assert!(set_threshold(&mut store, "huge", 10).await.is_err());
    }

    #[tokio::test]
    async fn test_set_policy_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = SettingsStore::new(Settings::default(), path.clone());

        set_policy(&mut store, PolicyCommand::Guard, ErrorPolicy::FailSafeAssume50)
            .await
            .unwrap();

        let reloaded = Settings::load_from(&path).await.unwrap();
        assert_eq!(reloaded.guard_policy, ErrorPolicy::FailSafeAssume50);
        assert_eq!(reloaded.preflight_policy, ErrorPolicy::FailSafeAssume50);
    }

    #[tokio::test]
    async fn test_reset_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        Settings::default().save_to(&path).await.unwrap();

        reset_config(&path).await.unwrap();
        assert!(!path.exists());
    }
}
