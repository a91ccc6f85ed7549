//! Threshold decision engine.
//!
//! Turns a [`UsageRecord`] and an operation class into a [`Decision`]:
//!
//! ```text
//! remaining >= required             -> approved  (proceed)
//! required/2 <= remaining < required -> caution   (proceed)
//! remaining < required/2             -> blocked
//! ```
//!
//! The half threshold is exact (12.5 for a required 25), compared in
//! doubled integer space.

use tracing::debug;

use crate::models::{
    Decision, DecisionLevel, ErrorPolicy, OperationClass, ThresholdTable, UsageRecord,
};

/// Usage assumed when the weekly figure is missing (or unreadable under
/// [`ErrorPolicy::FailSafeAssume50`]).
pub const ASSUMED_USAGE_PERCENT: u8 = 50;

// ============================================================================
// Decision Engine
// ============================================================================

/// Applies a threshold table and an error policy to usage records.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    thresholds: ThresholdTable,
    policy: ErrorPolicy,
}

impl DecisionEngine {
    /// Creates an engine with explicit thresholds and error policy.
    pub fn new(thresholds: ThresholdTable, policy: ErrorPolicy) -> Self {
        Self { thresholds, policy }
    }

    /// Decides whether an operation of the given class may proceed.
    ///
    /// Unrecognized class names use the standard threshold. Never fails.
    pub fn evaluate(&self, record: &UsageRecord, operation_class: &str) -> Decision {
        let class = OperationClass::resolve(operation_class);
        let required = self.thresholds.required_for(class);
        let name = caller_class_name(operation_class, class);

        if let Some(error) = record.error.as_deref() {
            return match self.policy {
                ErrorPolicy::FailOpen => {
                    debug!(error = %error, class = %name, "Usage unavailable, failing open");
                    Decision {
                        proceed: true,
                        level: DecisionLevel::Caution,
                        message: format!(
                            "Could not check usage ({error}); {} operation allowed by fail-open policy",
                            title_case(&name)
                        ),
                        operation_class: name,
                        remaining_percent: None,
                        required_percent: required,
                        assumed_usage: false,
                    }
                }
                ErrorPolicy::FailSafeAssume50 => {
                    debug!(error = %error, class = %name, "Usage unavailable, assuming 50%");
                    let note = format!("usage check failed: {error}; assumed {ASSUMED_USAGE_PERCENT}%");
                    judge(name, ASSUMED_USAGE_PERCENT, required, Some(&note))
                }
            };
        }

        match record.weekly_usage_percent {
            Some(used) => judge(name, used.min(100), required, None),
            None => {
                debug!(class = %name, "Weekly usage not found, assuming 50%");
                let note = format!("weekly usage unknown; assumed {ASSUMED_USAGE_PERCENT}%");
                judge(name, ASSUMED_USAGE_PERCENT, required, Some(&note))
            }
        }
    }
}

/// Convenience wrapper around [`DecisionEngine::evaluate`].
pub fn decide(
    record: &UsageRecord,
    operation_class: &str,
    thresholds: &ThresholdTable,
    policy: ErrorPolicy,
) -> Decision {
    DecisionEngine::new(*thresholds, policy).evaluate(record, operation_class)
}

/// Maps a remaining percentage to a decision level.
pub fn level_for(remaining: u8, required: u8) -> DecisionLevel {
    if remaining >= required {
        DecisionLevel::Approved
    } else if u16::from(remaining) * 2 >= u16::from(required) {
        DecisionLevel::Caution
    } else {
        DecisionLevel::Blocked
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn judge(operation_class: String, used: u8, required: u8, note: Option<&str>) -> Decision {
    let remaining = 100 - used;
    let level = level_for(remaining, required);
    let label = title_case(&operation_class);

    let verdict = match level {
        DecisionLevel::Approved => format!("{label} operation approved ({remaining}% remaining)"),
        DecisionLevel::Caution => format!(
            "{label} operation proceeding with caution ({remaining}% remaining, wanted {required}%)"
        ),
        DecisionLevel::Blocked => format!(
            "{label} operation blocked: only {remaining}% remaining (need {required}%)"
        ),
    };
    let message = match note {
        Some(note) => format!("{verdict} [{note}]"),
        None => verdict,
    };

    debug!(class = %operation_class, remaining, required, level = %level, "Decision made");

    Decision {
        proceed: level.proceeds(),
        level,
        message,
        operation_class,
        remaining_percent: Some(remaining),
        required_percent: required,
        assumed_usage: note.is_some(),
    }
}

/// The class name echoed back to the caller: their own spelling, or the
/// resolved class when they passed nothing.
fn caller_class_name(raw: &str, resolved: OperationClass) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        resolved.as_str().to_string()
    } else {
        trimmed.to_string()
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================
