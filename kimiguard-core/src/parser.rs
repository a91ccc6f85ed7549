//! Console snapshot parser.
//!
//! Extracts usage figures from the accessibility snapshot of the Kimi Code
//! console. The snapshot is unstructured prose; the parser looks for:
//!
//! ```text
//! Weekly usage
//!   42%
//!   Resets in 30 hours
//! Rate limit details
//!   80%
//!   Resets in 5 hours
//! ```
//!
//! Each field is extracted independently. A field that cannot be found is
//! left absent; nothing here returns an error.
//!
//! Percent searches start at a section label and stop at whichever comes
//! first: [`SECTION_WINDOW`] bytes, or the next recognized section label.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::UsageRecord;

// ============================================================================
// Constants
// ============================================================================

/// Maximum bytes scanned after a section label for its percentage.
pub const SECTION_WINDOW: usize = 400;

// ============================================================================
// Regex Patterns
// ============================================================================

/// "Weekly usage" section label, as whole words.
static WEEKLY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bweekly\s+usage\b").expect("Invalid regex"));

/// "Rate limit" / "Rate limit details" section label, as whole words
/// ("rate limited" is prose, not a label).
static RATE_LIMIT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\brate\s+limit(?:\s+details)?\b").expect("Invalid regex")
});

/// Integer immediately followed by a percent sign.
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("Invalid regex"));

/// "Resets in N hour(s)".
static RESETS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)resets\s+in\s+(\d+)\s*hours?\b").expect("Invalid regex")
});

// ============================================================================
// Parser
// ============================================================================

/// Parses a console snapshot into a usage record.
///
/// Deterministic and side-effect free; empty or unrelated text yields a
/// record with every field absent and no error.
pub fn parse_snapshot(text: &str) -> UsageRecord {
    if text.trim().is_empty() {
        debug!("Empty snapshot");
        return UsageRecord::new();
    }

    let resets = parse_reset_hours(text);

    let record = UsageRecord {
        weekly_usage_percent: parse_weekly_usage(text),
        weekly_resets_hours: resets.first().copied().flatten(),
        rate_limit_percent: parse_rate_limit(text),
        rate_limit_resets_hours: match resets.as_slice() {
            [] => None,
            [only] => *only,
            [_, second, ..] => *second,
        },
        ..UsageRecord::default()
    };

    debug!(
        len = text.len(),
        weekly = ?record.weekly_usage_percent,
        weekly_resets = ?record.weekly_resets_hours,
        rate_limit = ?record.rate_limit_percent,
        rate_limit_resets = ?record.rate_limit_resets_hours,
        resets_found = resets.len(),
        "Snapshot parsed"
    );

    record
}

/// Weekly usage percent from the "Weekly usage" section.
pub fn parse_weekly_usage(text: &str) -> Option<u8> {
    section_percent(text, &WEEKLY_LABEL_RE, &RATE_LIMIT_LABEL_RE)
}

/// Rate-limit percent from the "Rate limit" section.
pub fn parse_rate_limit(text: &str) -> Option<u8> {
    section_percent(text, &RATE_LIMIT_LABEL_RE, &WEEKLY_LABEL_RE)
}

/// Every "Resets in N hours" value, in document order.
///
/// Positions are preserved: a value too large for `u32` stays in the list
/// as `None` so the first/second ordering is not shifted.
pub fn parse_reset_hours(text: &str) -> Vec<Option<u32>> {
    RESETS_RE
        .captures_iter(text)
        .map(|caps| caps[1].parse::<u32>().ok())
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

/// Finds the first percentage inside a bounded window after any occurrence
/// of `label`, trying occurrences in order.
fn section_percent(text: &str, label: &Regex, next_section: &Regex) -> Option<u8> {
    label.find_iter(text).find_map(|m| {
        let mut window = bounded(&text[m.end()..], SECTION_WINDOW);
        if let Some(next) = next_section.find(window) {
            window = &window[..next.start()];
        }
        PERCENT_RE
            .captures(window)
            .and_then(|caps| parse_percent(&caps[1]))
    })
}

/// Parses a percentage, clamping to 100. Overflowing digit runs are
/// treated as not found.
fn parse_percent(digits: &str) -> Option<u8> {
    digits
        .parse::<u32>()
        .ok()
        .and_then(|v| u8::try_from(v.min(100)).ok())
}

/// Truncates to at most `max` bytes on a char boundary.
fn bounded(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// ============================================================================
// Tests
// ============================================================================
