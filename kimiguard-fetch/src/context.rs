//! Fetch context providing access to host APIs.
//!
//! The fetch context is passed to all strategies and bundles the process
//! runner with the settings that describe where the console lives.

use std::sync::Arc;
use std::time::Duration;

use crate::host::browser::{OPENCLAW_BINARY, OpenClawBrowser};
use crate::host::process::{DEFAULT_TIMEOUT, ProcessRunner};

/// Host name that identifies the console tab.
pub const DEFAULT_CONSOLE_HOST: &str = "kimi.com";

/// URL users are told to open when the tab is missing.
pub const DEFAULT_CONSOLE_URL: &str = "https://www.kimi.com/code/console";

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// OpenClaw binary name or path.
    pub binary: String,
    /// Host a tab snapshot must mention to count as the console.
    pub console_host: String,
    /// Console URL shown in remediation hints.
    pub console_url: String,
    /// Timeout for each `openclaw` invocation.
    pub timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            binary: OPENCLAW_BINARY.to_string(),
            console_host: DEFAULT_CONSOLE_HOST.to_string(),
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to fetch strategies, giving access to host APIs.
#[derive(Debug)]
pub struct FetchContext {
    /// Process runner for CLI tools.
    pub process: Arc<ProcessRunner>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a new fetch context with default settings.
    pub fn new() -> Self {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Self {
        Self {
            process: Arc::new(ProcessRunner::new()),
            settings,
        }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the per-invocation timeout.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Returns a browser wrapper configured from these settings.
    pub fn browser(&self) -> OpenClawBrowser {
        OpenClawBrowser::new(
            Arc::clone(&self.process),
            self.settings.binary.clone(),
            self.settings.timeout,
        )
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Debug, Default)]
pub struct FetchContextBuilder {
    process: Option<Arc<ProcessRunner>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the process runner.
    #[must_use]
    pub fn process(mut self, process: Arc<ProcessRunner>) -> Self {
        self.process = Some(process);
        self
    }

    /// Sets the fetch settings.
    #[must_use]
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the OpenClaw binary.
    #[must_use]
    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.settings.binary = binary.into();
        self
    }

    /// Sets the console host and URL.
    #[must_use]
    pub fn console(mut self, host: impl Into<String>, url: impl Into<String>) -> Self {
        self.settings.console_host = host.into();
        self.settings.console_url = url.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Builds the fetch context.
    pub fn build(self) -> FetchContext {
        FetchContext {
            process: self.process.unwrap_or_else(|| Arc::new(ProcessRunner::new())),
            settings: self.settings,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = FetchContext::builder()
            .binary("/opt/openclaw/bin/openclaw")
            .console("kimi.example", "https://kimi.example/console")
            .timeout(Duration::from_secs(60))
            .build();

        assert_eq!(ctx.settings.binary, "/opt/openclaw/bin/openclaw");
        assert_eq!(ctx.settings.console_host, "kimi.example");
        assert_eq!(ctx.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_default_context() {
        let ctx = FetchContext::new();
        assert_eq!(ctx.settings.binary, "openclaw");
        assert_eq!(ctx.settings.console_host, "kimi.com");
        assert_eq!(ctx.settings.console_url, "https://www.kimi.com/code/console");
        assert_eq!(ctx.timeout(), Duration::from_secs(30));
    }
}
