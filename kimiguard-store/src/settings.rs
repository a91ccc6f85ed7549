//! User settings.
//!
//! Thresholds and error policies feed the decision engine; browser
//! settings feed the fetch context.

use kimiguard_core::{ErrorPolicy, OperationClass, ThresholdTable};
use kimiguard_fetch::FetchSettings;
use kimiguard_fetch::context::{DEFAULT_CONSOLE_HOST, DEFAULT_CONSOLE_URL};
use kimiguard_fetch::host::browser::OPENCLAW_BINARY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Required remaining percentage per operation class.
    pub thresholds: ThresholdTable,

    /// Error policy for `preflight`.
    pub preflight_policy: ErrorPolicy,

    /// Error policy for `guard`.
    pub guard_policy: ErrorPolicy,

    /// Operation class `guard` checks when none is given.
    pub guard_class: String,

    /// Where and how to reach the console tab.
    pub browser: BrowserSettings,

    /// Log level used when neither `--verbose` nor `RUST_LOG` is set.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thresholds: ThresholdTable::default(),
            preflight_policy: ErrorPolicy::FailSafeAssume50,
            guard_policy: ErrorPolicy::FailOpen,
            guard_class: OperationClass::Standard.as_str().to_string(),
            browser: BrowserSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Checks every field for a usable value.
    ///
    /// `guard_class` is free text: unknown names resolve to the standard
    /// threshold at decision time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` naming the first bad field.
    pub fn validate(&self) -> Result<(), StoreError> {
        self.thresholds.validate()?;
        self.browser.validate()
    }

    /// Loads settings from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable, malformed,
    /// or fails validation.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        let settings: Self = match load_json(path).await {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings");
                return Err(e);
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validates and saves settings to `path`.
    ///
    /// # Errors
    ///
    /// Returns a validation, IO or serialization error.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        save_json(path, self).await?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Returns the policy configured for `command`.
    pub fn policy_for(&self, command: PolicyTarget) -> ErrorPolicy {
        match command {
            PolicyTarget::Preflight => self.preflight_policy,
            PolicyTarget::Guard => self.guard_policy,
        }
    }

    /// Sets the policy for `command`.
    pub fn set_policy(&mut self, command: PolicyTarget, policy: ErrorPolicy) {
        match command {
            PolicyTarget::Preflight => self.preflight_policy = policy,
            PolicyTarget::Guard => self.guard_policy = policy,
        }
    }
}

/// Commands that carry their own error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyTarget {
    /// The `preflight` command.
    Preflight,
    /// The `guard` command.
    Guard,
}

// ============================================================================
// Browser Settings
// ============================================================================

/// Browser automation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// OpenClaw binary name or path.
    pub binary: String,
    /// Host the console tab must mention.
    pub console_host: String,
    /// Console URL shown in hints.
    pub console_url: String,
    /// Per-invocation timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            binary: OPENCLAW_BINARY.to_string(),
            console_host: DEFAULT_CONSOLE_HOST.to_string(),
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl BrowserSettings {
    /// Checks the browser settings.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` for an empty binary or host, or a zero timeout.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.binary.trim().is_empty() {
            return Err(StoreError::Config("browser.binary is empty".to_string()));
        }
        if self.console_host.trim().is_empty() {
            return Err(StoreError::Config("browser.console_host is empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(StoreError::Config(
                "browser.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts to fetch settings.
    pub fn to_fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            binary: self.binary.clone(),
            console_host: self.console_host.clone(),
            console_url: self.console_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Settings bound to the file they were loaded from.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Settings,
    path: PathBuf,
}

impl SettingsStore {
    /// Binds already-loaded settings to `path`.
    pub fn new(settings: Settings, path: PathBuf) -> Self {
        Self { settings, path }
    }

    /// Current settings.
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `f` and validates the result, leaving settings unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the updated settings.
    pub fn update<F>(&mut self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut next = self.settings.clone();
        f(&mut next);
        next.validate()?;
        self.settings = next;
        Ok(())
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.settings.save_to(&self.path).await
    }
}

// ============================================================================
// Tests
// ============================================================================
