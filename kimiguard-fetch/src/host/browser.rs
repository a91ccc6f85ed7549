//! OpenClaw browser automation CLI.
//!
//! The Chrome extension exposes attached tabs through:
//!
//! ```text
//! openclaw browser tabs                          # JSON-ish tab list with targetId
//! openclaw browser snapshot --target-id <ID>     # accessibility snapshot text
//! ```
//!
//! Tab listings do not reliably pair URLs with ids, so every `targetId` is
//! snapshotted in turn until one mentions the console host.

use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::{FetchError, ProcessError};
use crate::host::process::ProcessRunner;

/// Default OpenClaw binary name.
pub const OPENCLAW_BINARY: &str = "openclaw";

/// `targetId": "ABC123` and its quoting variants.
static TARGET_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"targetId["']?\s*:\s*["']?([A-Fa-f0-9]+)"#).expect("Invalid regex")
});

// ============================================================================
// Browser
// ============================================================================

/// Wrapper around `openclaw browser` subcommands.
#[derive(Debug, Clone)]
pub struct OpenClawBrowser {
    runner: Arc<ProcessRunner>,
    binary: String,
    timeout: Duration,
}

impl OpenClawBrowser {
    /// Creates a browser wrapper for the given binary and per-call timeout.
    pub fn new(runner: Arc<ProcessRunner>, binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            runner,
            binary: binary.into(),
            timeout,
        }
    }

    /// Returns true if the OpenClaw binary can be found.
    pub fn is_installed(&self) -> bool {
        self.runner.command_exists(&self.binary)
    }

    /// Lists attached tabs (raw CLI output).
    ///
    /// # Errors
    ///
    /// Returns `BrowserUnavailable` if the binary is missing or exits
    /// non-zero, and a process error on timeout or spawn failure.
    #[instrument(skip(self))]
    pub async fn list_tabs(&self) -> Result<String, FetchError> {
        let output = self
            .runner
            .run_with_timeout(&self.binary, &["browser", "tabs"], self.timeout)
            .await
            .map_err(|e| match e {
                ProcessError::NotFound(cmd) => FetchError::BrowserUnavailable {
                    detail: format!("{cmd} not found on PATH"),
                },
                other => FetchError::Process(other),
            })?;

        let stdout = output.stdout_if_success().map_err(|e| {
            warn!(error = %e, "Tab listing failed");
            FetchError::BrowserUnavailable {
                detail: e.to_string(),
            }
        })?;

        Ok(clean_output(stdout))
    }

    /// Takes an accessibility snapshot of one tab.
    ///
    /// # Errors
    ///
    /// Returns any process error, including a non-zero exit.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, target_id: &str) -> Result<String, ProcessError> {
        let output = self
            .runner
            .run_with_timeout(
                &self.binary,
                &["browser", "snapshot", "--target-id", target_id],
                self.timeout,
            )
            .await?;

        output.stdout_if_success().map(clean_output)
    }

    /// Finds the tab showing `host` and returns its id and snapshot text.
    ///
    /// # Errors
    ///
    /// Returns `TabNotFound` (with `console_url` as the hint) when no tab
    /// snapshot mentions `host`, or any error from [`Self::list_tabs`].
    pub async fn find_console_snapshot(
        &self,
        host: &str,
        console_url: &str,
    ) -> Result<(String, String), FetchError> {
        let tabs = self.list_tabs().await?;
        let ids = parse_target_ids(&tabs);
        debug!(count = ids.len(), "Found tab target ids");

        for id in ids {
            match self.snapshot(&id).await {
                Ok(text) if mentions_host(&text, host) => {
                    info!(target_id = %id, "Found console tab");
                    return Ok((id, text));
                }
                Ok(_) => debug!(target_id = %id, "Tab is not the console"),
                Err(e) => debug!(target_id = %id, error = %e, "Snapshot failed, trying next tab"),
            }
        }

        Err(FetchError::TabNotFound {
            console_url: console_url.to_string(),
        })
    }
}

// ============================================================================
// Output Helpers
// ============================================================================

/// Extracts `targetId` values in order, without duplicates.
pub fn parse_target_ids(tabs_output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TARGET_ID_RE
        .captures_iter(tabs_output)
        .map(|caps| caps[1].to_string())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Returns true if the snapshot text mentions `host` (case-insensitive).
pub fn mentions_host(snapshot: &str, host: &str) -> bool {
    snapshot.to_lowercase().contains(&host.to_lowercase())
}

/// Strips ANSI escape sequences from CLI output.
pub fn clean_output(raw: &str) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(raw)).into_owned()
}

// ============================================================================
// Tests
// ============================================================================
