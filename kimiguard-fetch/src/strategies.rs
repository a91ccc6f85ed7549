//! Snapshot sources.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, instrument};

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::strategy::{FetchKind, FetchResult, FetchStrategy};

// ============================================================================
// Browser Tab Strategy
// ============================================================================

/// Snapshots the attached Kimi console tab through OpenClaw.
#[derive(Debug, Default)]
pub struct BrowserTabStrategy;

impl BrowserTabStrategy {
    /// Create a new browser tab strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FetchStrategy for BrowserTabStrategy {
    fn id(&self) -> &str {
        "kimi.browser"
    }

    fn kind(&self) -> FetchKind {
        FetchKind::BrowserTab
    }

    #[instrument(skip(self, ctx))]
    async fn is_available(&self, ctx: &FetchContext) -> bool {
        ctx.browser().is_installed()
    }

    #[instrument(skip(self, ctx))]
    async fn fetch(&self, ctx: &FetchContext) -> Result<FetchResult, FetchError> {
        debug!(host = %ctx.settings.console_host, "Fetching usage from console tab");

        let (target_id, text) = ctx
            .browser()
            .find_console_snapshot(&ctx.settings.console_host, &ctx.settings.console_url)
            .await?;

        debug!(target_id = %target_id, len = text.len(), "Got console snapshot");
        Ok(FetchResult::new(text, self.id(), self.kind()))
    }
}

// ============================================================================
// Snapshot File Strategy
// ============================================================================

/// Reads snapshot text from a file, or from stdin when no path is given.
#[derive(Debug, Default)]
pub struct SnapshotFileStrategy {
    path: Option<PathBuf>,
}

impl SnapshotFileStrategy {
    /// Reads from `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Reads from standard input.
    pub fn stdin() -> Self {
        Self { path: None }
    }

    /// `-` selects stdin; anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Self::stdin()
        } else {
            Self::from_path(arg)
        }
    }

    /// The file path, or `None` for stdin.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[async_trait]
impl FetchStrategy for SnapshotFileStrategy {
    fn id(&self) -> &str {
        match self.path {
            Some(_) => "kimi.snapshot_file",
            None => "kimi.stdin",
        }
    }

    fn kind(&self) -> FetchKind {
        match self.path {
            Some(_) => FetchKind::SnapshotFile,
            None => FetchKind::Stdin,
        }
    }

    async fn is_available(&self, _ctx: &FetchContext) -> bool {
        self.path.as_ref().is_none_or(|p| p.is_file())
    }

    #[instrument(skip(self, _ctx), fields(path = ?self.path))]
    async fn fetch(&self, _ctx: &FetchContext) -> Result<FetchResult, FetchError> {
        let text = match &self.path {
            Some(path) => tokio::fs::read_to_string(path).await.map_err(|source| {
                FetchError::SnapshotRead {
                    path: Some(path.clone()),
                    source,
                }
            })?,
            None => {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .map_err(|source| FetchError::SnapshotRead { path: None, source })?;
                buf
            }
        };

        debug!(len = text.len(), "Read snapshot text");
        Ok(FetchResult::new(text, self.id(), self.kind()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_browser_strategy_identity() {
        let s = BrowserTabStrategy::new();
        assert_eq!(s.id(), "kimi.browser");
        assert_eq!(s.kind(), FetchKind::BrowserTab);
    }

    #[test]
    fn test_from_arg_dash_is_stdin() {
        let s = SnapshotFileStrategy::from_arg(Path::new("-"));
        assert!(s.path().is_none());
        assert_eq!(s.kind(), FetchKind::Stdin);
        assert_eq!(s.id(), "kimi.stdin");

        let s = SnapshotFileStrategy::from_arg(Path::new("snap.txt"));
        assert_eq!(s.path(), Some(Path::new("snap.txt")));
        assert_eq!(s.kind(), FetchKind::SnapshotFile);
    }

    #[tokio::test]
    async fn test_reads_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Weekly usage\n42%\nResets in 12 hours").unwrap();

        let strategy = SnapshotFileStrategy::from_path(file.path());
        let ctx = FetchContext::new();

        assert!(strategy.is_available(&ctx).await);
        let result = strategy.fetch(&ctx).await.unwrap();
        assert!(result.text.contains("42%"));
        assert_eq!(result.strategy_id, "kimi.snapshot_file");
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let strategy = SnapshotFileStrategy::from_path(dir.path().join("absent.txt"));
        let ctx = FetchContext::new();

        assert!(!strategy.is_available(&ctx).await);
        let err = strategy.fetch(&ctx).await.unwrap_err();
        assert!(matches!(err, FetchError::SnapshotRead { path: Some(_), .. }));
    }

    #[tokio::test]
    async fn test_browser_strategy_without_openclaw() {
        let ctx = FetchContext::builder()
            .binary("openclaw_missing_binary_xyz")
            .build();
        let strategy = BrowserTabStrategy::new();

        assert!(!strategy.is_available(&ctx).await);
        let err = strategy.fetch(&ctx).await.unwrap_err();
        assert!(matches!(err, FetchError::BrowserUnavailable { .. }));
    }
}
