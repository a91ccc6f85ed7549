//! Turns a strategy run into a usage record.
//!
//! Acquisition never fails outward: every error becomes a record with
//! `error` set, so the decision engine's error policy can handle it.

use chrono::Local;
use kimiguard_core::{UsageRecord, parse_snapshot};
use tracing::{info, instrument, warn};

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::strategy::{FetchKind, FetchStrategy};

/// Runs `strategy` and parses whatever it returns.
///
/// An unavailable strategy is not run: a missing browser CLI becomes
/// [`FetchError::BrowserUnavailable`], any other source
/// [`FetchError::StrategyNotAvailable`].
#[instrument(skip_all, fields(strategy = %strategy.id()))]
pub async fn fetch_record(strategy: &dyn FetchStrategy, ctx: &FetchContext) -> UsageRecord {
    if !strategy.is_available(ctx).await {
        let err = unavailable_error(strategy, ctx);
        warn!(error = %err, "Strategy not available");
        return record_from_error(&err);
    }

    match strategy.fetch(ctx).await {
        Ok(result) => {
            let record = parse_snapshot(&result.text).with_timestamp(Local::now().naive_local());
            info!(
                kind = %result.kind,
                weekly = ?record.weekly_usage_percent,
                rate_limit = ?record.rate_limit_percent,
                "Parsed usage snapshot"
            );
            record
        }
        Err(e) => {
            warn!(error = %e, "Snapshot acquisition failed");
            record_from_error(&e)
        }
    }
}

/// Builds the error record for a failed acquisition.
pub fn record_from_error(err: &FetchError) -> UsageRecord {
    let record = UsageRecord::failed(err.to_string()).with_timestamp(Local::now().naive_local());
    match err.hint() {
        Some(hint) => record.with_message(hint),
        None => record,
    }
}

fn unavailable_error(strategy: &dyn FetchStrategy, ctx: &FetchContext) -> FetchError {
    match strategy.kind() {
        FetchKind::BrowserTab => FetchError::BrowserUnavailable {
            detail: format!("{} not found", ctx.settings.binary),
        },
        FetchKind::SnapshotFile | FetchKind::Stdin => {
            FetchError::StrategyNotAvailable(strategy.display_name())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
