// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # KimiGuard Fetch
//!
//! Acquires console snapshot text and turns it into a usage record.
//!
//! ## Host APIs
//!
//! - [`host::process`] - Subprocess execution with timeouts
//! - [`host::browser`] - The `openclaw browser` CLI (tab listing, snapshots)
//!
//! ## Strategies
//!
//! - [`strategy::FetchStrategy`] - Trait for snapshot sources
//! - [`strategies::BrowserTabStrategy`] - Finds the console tab and snapshots it
//! - [`strategies::SnapshotFileStrategy`] - Reads a saved snapshot (or stdin)
//!
//! ## Fetcher
//!
//! [`fetcher::fetch_record`] runs a strategy and always yields a
//! [`UsageRecord`](kimiguard_core::UsageRecord): acquisition failures become
//! records carrying `error`, never an `Err`.
//!
//! ## Example
//!
//! ```ignore
//! use kimiguard_fetch::{BrowserTabStrategy, FetchContext, fetch_record};
//!
//! let ctx = FetchContext::new();
//! let record = fetch_record(&BrowserTabStrategy::new(), &ctx).await;
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod fetcher;
pub mod host;
pub mod strategies;
pub mod strategy;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, ProcessError};

// Host APIs
pub use host::{
    browser::OpenClawBrowser,
    process::{ProcessOutput, ProcessRunner},
};

// Strategies & fetcher
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use fetcher::{fetch_record, record_from_error};
pub use strategies::{BrowserTabStrategy, SnapshotFileStrategy};
pub use strategy::{FetchKind, FetchResult, FetchStrategy};
