//! Fetch strategy trait and types.
//!
//! A strategy is one way of obtaining console snapshot text: the live
//! browser tab, or a snapshot saved to disk / piped on stdin.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::FetchContext;
use crate::error::FetchError;

// ============================================================================
// Fetch Kind
// ============================================================================

/// The kind of source a strategy reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    /// Live snapshot via the OpenClaw browser extension.
    BrowserTab,
    /// Snapshot text saved to a file.
    SnapshotFile,
    /// Snapshot text piped on standard input.
    Stdin,
}

impl FetchKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BrowserTab => "Browser Tab",
            Self::SnapshotFile => "Snapshot File",
            Self::Stdin => "Stdin",
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Fetch Result
// ============================================================================

/// Snapshot text obtained by a strategy.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Raw snapshot text.
    pub text: String,
    /// The strategy that produced it.
    pub strategy_id: String,
    /// The kind of source used.
    pub kind: FetchKind,
}

impl FetchResult {
    /// Creates a new fetch result.
    pub fn new(text: impl Into<String>, strategy_id: impl Into<String>, kind: FetchKind) -> Self {
        Self {
            text: text.into(),
            strategy_id: strategy_id.into(),
            kind,
        }
    }
}

// ============================================================================
// Fetch Strategy Trait
// ============================================================================

/// A source of console snapshot text.
///
/// ```ignore
/// struct CannedStrategy(&'static str);
///
/// #[async_trait]
/// impl FetchStrategy for CannedStrategy {
///     fn id(&self) -> &str { "kimi.canned" }
///     fn kind(&self) -> FetchKind { FetchKind::SnapshotFile }
///     async fn is_available(&self, _ctx: &FetchContext) -> bool { true }
///     async fn fetch(&self, _ctx: &FetchContext) -> Result<FetchResult, FetchError> {
///         Ok(FetchResult::new(self.0, self.id(), self.kind()))
///     }
/// }
/// ```
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Unique identifier for this strategy (e.g., "kimi.browser").
    fn id(&self) -> &str;

    /// The kind of source this strategy reads.
    fn kind(&self) -> FetchKind;

    /// Human-readable name for this strategy.
    fn display_name(&self) -> String {
        format!("{} ({})", self.id(), self.kind().display_name())
    }

    /// Quick, non-blocking check whether this strategy can run at all.
    async fn is_available(&self, ctx: &FetchContext) -> bool;

    /// Obtains the snapshot text.
    async fn fetch(&self, ctx: &FetchContext) -> Result<FetchResult, FetchError>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_kind_display() {
        assert_eq!(FetchKind::BrowserTab.to_string(), "Browser Tab");
        assert_eq!(FetchKind::Stdin.display_name(), "Stdin");
    }

    #[test]
    fn test_fetch_kind_serde() {
        assert_eq!(
            serde_json::to_string(&FetchKind::SnapshotFile).unwrap(),
            r#""snapshot_file""#
        );
    }
}
