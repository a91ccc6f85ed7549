//! Usage record types.
//!
//! A [`UsageRecord`] is built fresh for every invocation, either by the
//! snapshot parser or by the acquisition layer when the console could not
//! be read. Every numeric field is independent: a missing weekly
//! percentage never invalidates the rate-limit fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Usage Record
// ============================================================================

/// Usage figures read from the Kimi Code console.
///
/// Absent fields mean "not found", never zero. When [`error`](Self::error)
/// is set, the numeric fields must not be trusted and consumers treat the
/// record as an unknown state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Local time at which the snapshot was acquired.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp_format"
    )]
    pub timestamp: Option<NaiveDateTime>,
    /// Percentage of the weekly quota consumed (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_usage_percent: Option<u8>,
    /// Hours until the weekly quota resets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_resets_hours: Option<u32>,
    /// Percentage of the short-term rate limit consumed (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_percent: Option<u8>,
    /// Hours until the rate limit resets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_resets_hours: Option<u32>,
    /// Why the usage could not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Remediation hint accompanying `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UsageRecord {
    /// Creates an empty record (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record describing an acquisition failure.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Attaches a remediation hint.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Stamps the record with its acquisition time.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns true if this record describes a failed acquisition.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Weekly usage, or `None` if absent or untrusted.
    pub fn trusted_weekly_usage(&self) -> Option<u8> {
        if self.is_error() {
            None
        } else {
            self.weekly_usage_percent
        }
    }

    /// Remaining weekly quota (100 - used), if known.
    pub fn weekly_remaining_percent(&self) -> Option<u8> {
        self.trusted_weekly_usage().map(|used| 100 - used.min(100))
    }
}

// ============================================================================
// Timestamp Format
// ============================================================================

/// `YYYY-MM-DD HH:MM:SS`, the format automation consumers already parse.
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => s.serialize_str(&ts.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

// ============================================================================
// Tests
// ============================================================================
