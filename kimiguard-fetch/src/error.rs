//! Fetch error types.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for snapshot acquisition.
///
/// Display strings end up in `UsageRecord::error`, so they stay short and
/// stable; [`FetchError::hint`] supplies the remediation text.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The browser automation CLI is missing or refused to list tabs.
    #[error("Browser not available")]
    BrowserUnavailable {
        /// What went wrong, for logs.
        detail: String,
    },

    /// No open tab shows the Kimi Code console.
    #[error("Kimi console tab not found")]
    TabNotFound {
        /// Console URL the user should open.
        console_url: String,
    },

    /// Reading a saved snapshot failed.
    #[error("Could not read snapshot {}: {source}", display_path(.path.as_ref()))]
    SnapshotRead {
        /// File path, or `None` for stdin.
        path: Option<PathBuf>,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Process error.
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// The strategy's source is missing before any fetch is attempted.
    #[error("Strategy not available: {0}")]
    StrategyNotAvailable(String),
}

impl FetchError {
    /// Remediation hint for the user, if there is one.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::BrowserUnavailable { .. } => {
                Some("Ensure Chrome extension is attached".to_string())
            }
            Self::TabNotFound { console_url } => Some(format!(
                "Open {console_url} and attach the extension"
            )),
            Self::Process(ProcessError::Timeout(_)) => {
                Some("The browser did not answer in time; check the OpenClaw extension".to_string())
            }
            Self::StrategyNotAvailable(_) => {
                Some("Check that the snapshot file exists and is readable".to_string())
            }
            Self::SnapshotRead { .. } | Self::Process(_) => None,
        }
    }
}

fn display_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}

// ============================================================================
// Process Error
// ============================================================================

/// Error type for process operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command not found.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Command timed out.
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// Non-zero exit code.
    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code from the process.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
