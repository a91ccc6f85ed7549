//! Decision results and capacity tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::usage::UsageRecord;

// ============================================================================
// Decision Level
// ============================================================================

/// Outcome tier of a threshold decision.
///
/// Ordered from strictest to most permissive, so `Blocked < Caution < Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionLevel {
    /// Not enough quota left; do not proceed.
    Blocked,
    /// Below the class threshold but above half of it.
    Caution,
    /// Enough quota left.
    Approved,
}

impl DecisionLevel {
    /// Returns true if the caller may proceed at this level.
    pub fn proceeds(&self) -> bool {
        !matches!(self, Self::Blocked)
    }

    /// Returns the lowercase name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Caution => "caution",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for DecisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Decision
// ============================================================================

/// The result of evaluating a usage record for one operation class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the caller should proceed.
    pub proceed: bool,
    /// Decision tier.
    pub level: DecisionLevel,
    /// Human-readable rationale.
    pub message: String,
    /// Operation class as supplied by the caller.
    pub operation_class: String,
    /// Remaining percent the decision was computed from.
    ///
    /// Absent when the fail-open policy skipped the threshold check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_percent: Option<u8>,
    /// Remaining percent the operation class requires.
    pub required_percent: u8,
    /// True when the weekly usage was unknown and 50% was substituted.
    #[serde(default)]
    pub assumed_usage: bool,
}

// ============================================================================
// Capacity Tier
// ============================================================================

/// Coarse capacity bucket used by the usage logger and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityTier {
    /// More than 50% remaining.
    High,
    /// More than 25% remaining.
    Moderate,
    /// 25% or less remaining.
    Low,
    /// Usage could not be checked.
    Unknown,
}

impl CapacityTier {
    /// Buckets a remaining percentage.
    pub fn from_remaining(remaining: u8) -> Self {
        if remaining > 50 {
            Self::High
        } else if remaining > 25 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Buckets a record, assuming 50% usage when the weekly figure is absent.
    pub fn from_record(record: &UsageRecord) -> Self {
        if record.is_error() {
            return Self::Unknown;
        }
        let remaining = record
            .weekly_remaining_percent()
            .unwrap_or(100 - crate::engine::ASSUMED_USAGE_PERCENT);
        Self::from_remaining(remaining)
    }

    /// Recommendation line for autonomous callers.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::High => "High capacity — full operations approved",
            Self::Moderate => "Moderate capacity — prioritize essential tasks",
            Self::Low => "Low capacity — essential tasks only, defer proactive work",
            Self::Unknown => "Could not check usage — proceed with caution",
        }
    }

    /// Short status line for the usage report.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::High => "Healthy — full ops approved",
            Self::Moderate => "Moderate — plan accordingly",
            Self::Low => "Low — prioritize essential tasks",
            Self::Unknown => "Unknown — usage unavailable",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
