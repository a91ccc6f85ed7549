//! Operation classes, the threshold table, and error policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Operation Class
// ============================================================================

/// Caller-declared intensity of the work about to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationClass {
    /// Quick lookups, single edits.
    Light,
    /// Regular multi-step work.
    Standard,
    /// Subagent fan-out, long research runs.
    Intensive,
}

impl OperationClass {
    /// All classes in increasing intensity.
    pub const ALL: [OperationClass; 3] = [Self::Light, Self::Standard, Self::Intensive];

    /// Parses a class name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "standard" => Some(Self::Standard),
            "intensive" => Some(Self::Intensive),
            _ => None,
        }
    }

    /// Parses a class name, falling back to [`OperationClass::Standard`].
    pub fn resolve(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::Standard)
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Standard => "standard",
            Self::Intensive => "intensive",
        }
    }
}

impl fmt::Display for OperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Threshold Table
// ============================================================================

/// Minimum remaining weekly quota (percent) each class needs to be approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    /// Required remaining percent for light operations.
    pub light: u8,
    /// Required remaining percent for standard operations.
    pub standard: u8,
    /// Required remaining percent for intensive operations.
    pub intensive: u8,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            light: 10,
            standard: 25,
            intensive: 50,
        }
    }
}

impl ThresholdTable {
    /// Required remaining percent for a class.
    pub fn required_for(&self, class: OperationClass) -> u8 {
        match class {
            OperationClass::Light => self.light,
            OperationClass::Standard => self.standard,
            OperationClass::Intensive => self.intensive,
        }
    }

    /// Overrides the threshold for one class.
    pub fn set(&mut self, class: OperationClass, required: u8) {
        match class {
            OperationClass::Light => self.light = required,
            OperationClass::Standard => self.standard = required,
            OperationClass::Intensive => self.intensive = required,
        }
    }

    /// Validates that every threshold is a percentage.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` for any threshold above 100.
    pub fn validate(&self) -> Result<(), CoreError> {
        for class in OperationClass::ALL {
            let required = self.required_for(class);
            if required > 100 {
                return Err(CoreError::InvalidConfig(format!(
                    "{class} threshold {required} out of valid range [0, 100]"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Error Policy
// ============================================================================

/// How a record carrying an acquisition error is decided.
///
/// Has no `Default`; every caller names its policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Allow the operation (with caution) when usage cannot be checked.
    #[serde(rename = "fail-open")]
    FailOpen,
    /// Assume 50% usage and apply the normal thresholds.
    #[serde(rename = "fail-safe-assume-50")]
    FailSafeAssume50,
}

impl ErrorPolicy {
    /// Returns the configuration name of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailOpen => "fail-open",
            Self::FailSafeAssume50 => "fail-safe-assume-50",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fail-open" | "open" => Ok(Self::FailOpen),
            "fail-safe-assume-50" | "fail-safe" | "assume-50" => Ok(Self::FailSafeAssume50),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown error policy '{other}' (expected fail-open or fail-safe-assume-50)"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_class_parse() {
        assert_eq!(OperationClass::parse("light"), Some(OperationClass::Light));
        assert_eq!(OperationClass::parse(" Intensive "), Some(OperationClass::Intensive));
        assert_eq!(OperationClass::parse("STANDARD"), Some(OperationClass::Standard));
        assert_eq!(OperationClass::parse("huge"), None);
    }

    #[test]
    fn test_operation_class_fallback() {
        assert_eq!(OperationClass::resolve("huge"), OperationClass::Standard);
        assert_eq!(OperationClass::resolve(""), OperationClass::Standard);
    }

    #[test]
    fn test_default_thresholds() {
        let table = ThresholdTable::default();
        assert_eq!(table.required_for(OperationClass::Light), 10);
        assert_eq!(table.required_for(OperationClass::Standard), 25);
        assert_eq!(table.required_for(OperationClass::Intensive), 50);
        assert_eq!(table.required_for(OperationClass::resolve("unknown")), 25);
    }

    #[test]
    fn test_threshold_override() {
        let mut table = ThresholdTable::default();
        table.set(OperationClass::Intensive, 70);
        assert_eq!(table.required_for(OperationClass::Intensive), 70);
        assert!(table.validate().is_ok());

        table.set(OperationClass::Light, 101);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_error_policy_from_str() {
        assert_eq!("fail-open".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::FailOpen);
        assert_eq!(
            "fail_safe_assume_50".parse::<ErrorPolicy>().unwrap(),
            ErrorPolicy::FailSafeAssume50
        );
        assert!("maybe".parse::<ErrorPolicy>().is_err());
    }

    #[test]
    fn test_error_policy_display_roundtrips() {
        for policy in [ErrorPolicy::FailOpen, ErrorPolicy::FailSafeAssume50] {
            assert_eq!(policy.to_string().parse::<ErrorPolicy>().unwrap(), policy);
        }
    }
}
