//! JSON output formatting.

use anyhow::Result;
use kimiguard_core::{CapacityTier, Decision, DecisionLevel, UsageRecord};
use serde::Serialize;

/// Note attached to the guard's fail-open output.
pub const GUARD_FALLBACK_NOTE: &str = "Defaulting to allow due to check failure";

// ============================================================================
// Output Types
// ============================================================================

/// `preflight` result.
#[derive(Debug, Serialize)]
pub struct PreflightOutput<'a> {
    pub proceed: bool,
    pub level: DecisionLevel,
    pub message: &'a str,
    pub usage: &'a UsageRecord,
    pub operation_type: &'a str,
}

impl<'a> PreflightOutput<'a> {
    /// Builds the output for a decision on `record`.
    pub fn new(decision: &'a Decision, record: &'a UsageRecord, operation_type: &'a str) -> Self {
        Self {
            proceed: decision.proceed,
            level: decision.level,
            message: &decision.message,
            usage: record,
            operation_type,
        }
    }
}

/// `guard` result when the threshold was checked.
#[derive(Debug, Serialize)]
pub struct GuardOutput {
    pub can_spawn: bool,
    pub usage_percent: Option<u8>,
    pub remaining_percent: Option<u8>,
    pub resets_hours: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub assumed_usage: bool,
}

impl GuardOutput {
    /// Spawning needs a fully approved decision; caution is not enough.
    pub fn from_decision(decision: &Decision, record: &UsageRecord) -> Self {
        Self {
            can_spawn: decision.level == DecisionLevel::Approved,
            usage_percent: decision.remaining_percent.map(|r| 100 - r),
            remaining_percent: decision.remaining_percent,
            resets_hours: record.weekly_resets_hours,
            assumed_usage: decision.assumed_usage,
        }
    }
}

/// `guard` result when usage could not be checked under fail-open.
#[derive(Debug, Serialize)]
pub struct GuardFallbackOutput<'a> {
    pub can_spawn: bool,
    pub error: &'a str,
    pub note: &'static str,
}

impl<'a> GuardFallbackOutput<'a> {
    /// Builds the fail-open output for `error`.
    pub fn new(error: &'a str) -> Self {
        Self {
            can_spawn: true,
            error,
            note: GUARD_FALLBACK_NOTE,
        }
    }
}

/// `log` result.
#[derive(Debug, Serialize)]
pub struct LogOutput<'a> {
    pub decision: &'static str,
    pub tier: CapacityTier,
    pub usage: &'a UsageRecord,
}

impl<'a> LogOutput<'a> {
    /// Builds the recommendation output for `record`.
    pub fn new(record: &'a UsageRecord) -> Self {
        let tier = CapacityTier::from_record(record);
        Self {
            decision: tier.recommendation(),
            tier,
            usage: record,
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}
