//! CLI command implementations.

pub mod config;
pub mod guard;
pub mod log;
pub mod preflight;
pub mod usage;

use kimiguard_core::{ErrorPolicy, OperationClass, UsageRecord};
use kimiguard_fetch::{
    BrowserTabStrategy, FetchContext, FetchStrategy, SnapshotFileStrategy, fetch_record,
};
use kimiguard_store::Settings;
use tracing::{debug, warn};

use crate::Cli;

/// Fetches the usage record from `--snapshot` or the browser.
pub async fn acquire_record(cli: &Cli, settings: &Settings) -> UsageRecord {
    let ctx = FetchContext::with_settings(settings.browser.to_fetch_settings());

    let strategy: Box<dyn FetchStrategy> = match &cli.snapshot {
        Some(path) => Box::new(SnapshotFileStrategy::from_arg(path)),
        None => Box::new(BrowserTabStrategy::new()),
    };
    debug!(strategy = %strategy.display_name(), "Acquiring usage record");

    fetch_record(strategy.as_ref(), &ctx).await
}

/// Parses an `--on-error` value.
pub fn parse_policy(value: &str) -> Result<ErrorPolicy, String> {
    value.parse::<ErrorPolicy>().map_err(|e| e.to_string())
}

/// Warns when a class name falls back to `standard`.
pub fn warn_unknown_class(name: &str) {
    if OperationClass::parse(name).is_none() {
        warn!(class = %name, "Unknown operation class, using standard threshold");
    }
}
