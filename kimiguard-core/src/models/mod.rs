//! Domain models for KimiGuard.
//!
//! ## Submodules
//!
//! - [`usage`] - The usage record produced by the snapshot parser
//! - [`decision`] - Decision results and capacity tiers
//! - [`thresholds`] - Operation classes, threshold table, error policies

mod decision;
mod thresholds;
mod usage;

// Re-export everything at the models level
pub use decision::{CapacityTier, Decision, DecisionLevel};
pub use thresholds::{ErrorPolicy, OperationClass, ThresholdTable};
pub use usage::UsageRecord;
#[cfg(test)]
mod serde_tests;
