// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `KimiGuard` Core
//!
//! Core types and pure logic for the `KimiGuard` toolkit.
//!
//! This crate has no I/O. It turns raw console snapshot text into a
//! [`UsageRecord`] and turns a record into a [`Decision`]:
//!
//! - [`parser`] - Snapshot text parsing with bounded section windows
//! - [`engine`] - Threshold decisions per operation class
//! - [`models`] - Records, decisions, thresholds and policies
//!
//! ## Key Types
//!
//! ### Usage
//! - [`UsageRecord`] - Weekly and rate-limit usage, or an acquisition error
//! - [`CapacityTier`] - Coarse capacity bucket for logging and status lines
//!
//! ### Decisions
//! - [`OperationClass`] - Light / standard / intensive
//! - [`ThresholdTable`] - Required remaining percent per class
//! - [`ErrorPolicy`] - How an unavailable reading is treated
//! - [`DecisionEngine`] - Applies thresholds and policy to a record
//! - [`Decision`] / [`DecisionLevel`] - The result
//!
//! ## Example
//!
//! ```
//! use kimiguard_core::{parse_snapshot, DecisionEngine, DecisionLevel, ErrorPolicy, ThresholdTable};
//!
//! let record = parse_snapshot("Weekly usage\n80%\nResets in 30 hours");
//! let engine = DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailSafeAssume50);
//! let decision = engine.evaluate(&record, "standard");
//!
//! assert_eq!(decision.level, DecisionLevel::Caution);
//! assert!(decision.proceed);
//! ```

pub mod engine;
pub mod error;
pub mod models;
pub mod parser;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Usage types
    CapacityTier,
    UsageRecord,
    // Decision types
    Decision,
    DecisionLevel,
    ErrorPolicy,
    OperationClass,
    ThresholdTable,
};

// Re-export the pure entry points
pub use engine::{ASSUMED_USAGE_PERCENT, DecisionEngine, decide};
pub use parser::parse_snapshot;
