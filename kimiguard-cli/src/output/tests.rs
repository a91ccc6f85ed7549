//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{TextFormatter, format_hours};
    use chrono::NaiveDate;
    use kimiguard_core::{
        CapacityTier, DecisionEngine, ErrorPolicy, ThresholdTable, UsageRecord, parse_snapshot,
    };
    use kimiguard_store::Settings;
    use std::path::Path;

    #[test]
    fn test_progress_bar_boundary_values() {
        let formatter = TextFormatter::new(false);

        let test_cases = vec![
            (0, "░░░░░░░░░░"),
            (10, "█░░░░░░░░░"),
            (25, "███░░░░░░░"),
            (50, "█████░░░░░"),
            (75, "████████░░"),
            (100, "██████████"),
        ];

        for (percent, expected) in test_cases {
            assert_eq!(formatter.progress_bar(percent), expected, "Failed for {percent}%");
        }
    }

    #[test]
    fn test_progress_bar_with_colors() {
        let formatter = TextFormatter::new(true);

        assert!(formatter.progress_bar(10).contains("\x1b[31m"), "low should be red");
        assert!(formatter.progress_bar(40).contains("\x1b[33m"), "moderate should be yellow");
        assert!(formatter.progress_bar(80).contains("\x1b[32m"), "high should be green");
    }

    #[test]
    fn test_format_usage_report() {
        let formatter = TextFormatter::new(false);
        let record = parse_snapshot(
            "Weekly usage\n80%\nResets in 30 hours\nRate limit details\n12%\nResets in 2 hours",
        );

        let out = formatter.format_usage(&record);

        assert!(out.starts_with("Kimi Usage Monitor"));
        assert!(out.contains("Weekly Usage"));
        assert!(out.contains("Used:      80%"));
        assert!(out.contains("20%"));
        assert!(out.contains("Resets in: 30 hours"));
        assert!(out.contains("Status:    Low — prioritize essential tasks"));
        assert!(out.contains("Rate Limit"));
        assert!(out.contains("Resets in: 2 hours"));
        assert!(!out.contains("\x1b["));
    }

    #[test]
    fn test_format_usage_status_tiers() {
        let formatter = TextFormatter::new(false);

        let out = formatter.format_usage(&parse_snapshot("Weekly usage 30%"));
        assert!(out.contains("Healthy — full ops approved"));

        let out = formatter.format_usage(&parse_snapshot("Weekly usage 70%"));
        assert!(out.contains("Moderate — plan accordingly"));
    }

    #[test]
    fn test_format_usage_without_figures() {
        let formatter = TextFormatter::new(false);
        let out = formatter.format_usage(&UsageRecord::new());
        assert!(out.contains("No usage figures found"));
        assert!(!out.contains("Weekly Usage"));
    }

    #[test]
    fn test_format_usage_timestamp() {
        let formatter = TextFormatter::new(false);
        let ts = NaiveDate::from_ymd_opt(2026, 3, 2)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .unwrap();
        let record = parse_snapshot("Weekly usage 10%").with_timestamp(ts);

        assert!(formatter.format_usage(&record).contains("Checked 2026-03-02 09:05:00"));
    }

    #[test]
    fn test_format_error_record() {
        let formatter = TextFormatter::new(false);
        let record = UsageRecord::failed("Browser not available")
            .with_message("Ensure Chrome extension is attached");

        let out = formatter.format_usage(&record);

        assert_eq!(
            out,
            "✗ Browser not available\n   Ensure Chrome extension is attached"
        );
    }

    #[test]
    fn test_format_decision_symbols() {
        let formatter = TextFormatter::new(false);
        let engine = DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailOpen);

        let approved = engine.evaluate(&parse_snapshot("Weekly usage 10%"), "light");
        assert!(formatter.format_decision(&approved).starts_with("✓ "));

        let caution = engine.evaluate(&parse_snapshot("Weekly usage 80%"), "standard");
        assert!(formatter.format_decision(&caution).starts_with("! "));

        let blocked = engine.evaluate(&parse_snapshot("Weekly usage 95%"), "intensive");
        assert!(formatter.format_decision(&blocked).starts_with("✗ "));
    }

    #[test]
    fn test_format_recommendation() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_recommendation(CapacityTier::High),
            "✓ High capacity — full operations approved"
        );
        assert_eq!(
            formatter.format_recommendation(CapacityTier::Unknown),
            "! Could not check usage — proceed with caution"
        );
    }

    #[test]
    fn test_format_guard() {
        let formatter = TextFormatter::new(false);
        assert!(formatter.format_guard(true, "ok").starts_with("✓ Subagent spawn allowed"));
        assert!(formatter.format_guard(false, "low").starts_with("✗ Subagent spawn denied"));
    }

    #[test]
    fn test_format_settings() {
        let formatter = TextFormatter::new(false);
        let out = formatter.format_settings(&Settings::default(), Path::new("/tmp/settings.json"));

        assert!(out.contains("intensive  50%"));
        assert!(out.contains("Preflight on error: fail-safe-assume-50"));
        assert!(out.contains("Guard on error:     fail-open"));
        assert!(out.contains("/tmp/settings.json"));
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(Some(1)), "1 hour");
        assert_eq!(format_hours(Some(0)), "0 hours");
        assert_eq!(format_hours(None), "unknown");
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{
        GUARD_FALLBACK_NOTE, GuardFallbackOutput, GuardOutput, JsonFormatter, LogOutput,
        PreflightOutput,
    };
    use kimiguard_core::{DecisionEngine, ErrorPolicy, ThresholdTable, UsageRecord, parse_snapshot};
    use serde_json::{Value, json};

    fn to_value<T: serde::Serialize>(data: &T) -> Value {
        let out = JsonFormatter::new(false).format(data).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_pretty_vs_compact() {
        let data = json!({"a": 1});
        assert_eq!(JsonFormatter::new(false).format(&data).unwrap(), r#"{"a":1}"#);
        assert!(JsonFormatter::new(true).format(&data).unwrap().contains('\n'));
    }

    #[test]
    fn test_preflight_output_shape() {
        let record = parse_snapshot("Weekly usage 80%\nResets in 30 hours");
        let decision = DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailSafeAssume50)
            .evaluate(&record, "standard");

        let value = to_value(&PreflightOutput::new(&decision, &record, "standard"));

        assert_eq!(value["proceed"], json!(true));
        assert_eq!(value["level"], json!("caution"));
        assert_eq!(value["operation_type"], json!("standard"));
        assert_eq!(value["usage"]["weekly_usage_percent"], json!(80));
        assert_eq!(value["usage"]["weekly_resets_hours"], json!(30));
        assert!(value["message"].as_str().unwrap().contains("20% remaining"));
    }

    #[test]
    fn test_guard_output_shape() {
        let record = parse_snapshot("Weekly usage 40%\nResets in 12 hours");
        let decision = DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailOpen)
            .evaluate(&record, "standard");

        let value = to_value(&GuardOutput::from_decision(&decision, &record));

        assert_eq!(
            value,
            json!({
                "can_spawn": true,
                "usage_percent": 40,
                "remaining_percent": 60,
                "resets_hours": 12
            })
        );
    }

    #[test]
    fn test_guard_output_nulls_when_reset_unknown() {
        let record = parse_snapshot("Weekly usage 90%");
        let decision = DecisionEngine::new(ThresholdTable::default(), ErrorPolicy::FailOpen)
            .evaluate(&record, "standard");

        let value = to_value(&GuardOutput::from_decision(&decision, &record));

        assert_eq!(value["can_spawn"], json!(false));
        assert_eq!(value["resets_hours"], Value::Null);
        assert!(value.get("assumed_usage").is_none());
    }

    #[test]
    fn test_guard_fallback_shape() {
        let value = to_value(&GuardFallbackOutput::new("Browser not available"));
        assert_eq!(
            value,
            json!({
                "can_spawn": true,
                "error": "Browser not available",
                "note": GUARD_FALLBACK_NOTE
            })
        );
    }

    #[test]
    fn test_log_output_shape() {
        let record = UsageRecord::failed("Kimi console tab not found");
        let value = to_value(&LogOutput::new(&record));

        assert_eq!(
            value["decision"],
            json!("Could not check usage — proceed with caution")
        );
        assert_eq!(value["tier"], json!("unknown"));
        assert_eq!(value["usage"]["error"], json!("Kimi console tab not found"));
    }
}
