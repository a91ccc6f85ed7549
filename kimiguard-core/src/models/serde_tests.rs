//! Serde tests for core types.
//!
//! The JSON shape of [`UsageRecord`] is consumed by shell automation, so
//! these tests pin field names and the omission of absent fields.

use chrono::NaiveDate;
use serde_json::json;

use crate::{Decision, DecisionLevel, ErrorPolicy, OperationClass, ThresholdTable, UsageRecord};

// ============================================================================
// UsageRecord Serde Tests
// ============================================================================

#[test]
fn test_usage_record_empty_serializes_to_empty_object() {
    let json = serde_json::to_value(UsageRecord::new()).unwrap();
    assert_eq!(json, json!({}));
}

#[test]
fn test_usage_record_field_names() {
    let timestamp = NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap();
    let record = UsageRecord {
        weekly_usage_percent: Some(42),
        weekly_resets_hours: Some(30),
        rate_limit_percent: Some(80),
        rate_limit_resets_hours: Some(5),
        ..UsageRecord::default()
    }
    .with_timestamp(timestamp);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        json!({
            "timestamp": "2026-03-02 09:15:00",
            "weekly_usage_percent": 42,
            "weekly_resets_hours": 30,
            "rate_limit_percent": 80,
            "rate_limit_resets_hours": 5
        })
    );
}

#[test]
fn test_usage_record_error_shape() {
    let record = UsageRecord::failed("Kimi console tab not found")
        .with_message("Open https://www.kimi.com/code/console and attach the extension");
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["error"], "Kimi console tab not found");
    assert!(json.get("weekly_usage_percent").is_none());
}

#[test]
fn test_usage_record_deserialize_partial() {
    let record: UsageRecord =
        serde_json::from_str(r#"{"rate_limit_percent": 12, "timestamp": "2026-01-01 00:00:00"}"#)
            .unwrap();
    assert_eq!(record.rate_limit_percent, Some(12));
    assert!(record.timestamp.is_some());
    assert!(record.weekly_usage_percent.is_none());
}

#[test]
fn test_usage_record_bad_timestamp_rejected() {
    let result: Result<UsageRecord, _> = serde_json::from_str(r#"{"timestamp": "yesterday"}"#);
    assert!(result.is_err());
}

// ============================================================================
// Policy & Threshold Serde Tests
// ============================================================================

#[test]
fn test_error_policy_names() {
    assert_eq!(
        serde_json::to_string(&ErrorPolicy::FailOpen).unwrap(),
        r#""fail-open""#
    );
    assert_eq!(
        serde_json::to_string(&ErrorPolicy::FailSafeAssume50).unwrap(),
        r#""fail-safe-assume-50""#
    );
}

#[test]
fn test_threshold_table_partial_uses_defaults() {
    let table: ThresholdTable = serde_json::from_str(r#"{"intensive": 60}"#).unwrap();
    assert_eq!(table.required_for(OperationClass::Intensive), 60);
    assert_eq!(table.required_for(OperationClass::Light), 10);
    assert_eq!(table.required_for(OperationClass::Standard), 25);
}

#[test]
fn test_decision_serializes_level_lowercase() {
    let decision = Decision {
        proceed: false,
        level: DecisionLevel::Blocked,
        message: "Intensive operation blocked: only 5% remaining (need 50%)".to_string(),
        operation_class: "intensive".to_string(),
        remaining_percent: Some(5),
        required_percent: 50,
        assumed_usage: false,
    };
    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["level"], "blocked");
    assert_eq!(json["proceed"], false);
    assert_eq!(json["operation_class"], "intensive");
}
