//! End-to-end tests: snapshot text through the parser and decision engine.

use kimiguard_core::{
    DecisionEngine, DecisionLevel, ErrorPolicy, ThresholdTable, UsageRecord, parse_snapshot,
};

fn engine(policy: ErrorPolicy) -> DecisionEngine {
    DecisionEngine::new(ThresholdTable::default(), policy)
}

#[test]
fn test_console_snapshot_to_record() {
    let text = "Weekly usage ... 42% ... Resets in 30 hours ... Rate limit details ... 80% ... Resets in 5 hours";
    let record = parse_snapshot(text);
    assert_eq!(
        record,
        UsageRecord {
            weekly_usage_percent: Some(42),
            weekly_resets_hours: Some(30),
            rate_limit_percent: Some(80),
            rate_limit_resets_hours: Some(5),
            ..UsageRecord::default()
        }
    );
}

#[test]
fn test_standard_at_eighty_percent_is_caution() {
    let record = UsageRecord {
        weekly_usage_percent: Some(80),
        ..UsageRecord::default()
    };
    let decision = engine(ErrorPolicy::FailSafeAssume50).evaluate(&record, "standard");
    assert_eq!(decision.remaining_percent, Some(20));
    assert_eq!(decision.level, DecisionLevel::Caution);
    assert!(decision.proceed);
}

#[test]
fn test_intensive_at_ninety_five_percent_is_blocked() {
    let record = UsageRecord {
        weekly_usage_percent: Some(95),
        ..UsageRecord::default()
    };
    let decision = engine(ErrorPolicy::FailSafeAssume50).evaluate(&record, "intensive");
    assert_eq!(decision.remaining_percent, Some(5));
    assert_eq!(decision.level, DecisionLevel::Blocked);
    assert!(!decision.proceed);
}

#[test]
fn test_error_record_fail_open_proceeds() {
    let record = UsageRecord::failed("Browser not available");
    let decision = engine(ErrorPolicy::FailOpen).evaluate(&record, "intensive");
    assert!(decision.proceed);
}

#[test]
fn test_error_record_fail_safe_light_is_approved() {
    let record = UsageRecord::failed("Browser not available");
    let decision = engine(ErrorPolicy::FailSafeAssume50).evaluate(&record, "light");
    assert_eq!(decision.remaining_percent, Some(50));
    assert_eq!(decision.required_percent, 10);
    assert_eq!(decision.level, DecisionLevel::Approved);
    assert!(decision.proceed);
}

#[test]
fn test_policies_stay_distinct_on_error() {
    let record = UsageRecord::failed("timeout");

    let open = engine(ErrorPolicy::FailOpen).evaluate(&record, "intensive");
    let safe = engine(ErrorPolicy::FailSafeAssume50).evaluate(&record, "intensive");

    assert_eq!(open.level, DecisionLevel::Caution);
    assert_eq!(open.remaining_percent, None);
    assert!(!open.assumed_usage);

    assert_eq!(safe.level, DecisionLevel::Approved);
    assert_eq!(safe.remaining_percent, Some(50));
    assert!(safe.assumed_usage);
}

#[test]
fn test_levels_monotone_in_remaining() {
    for policy in [ErrorPolicy::FailOpen, ErrorPolicy::FailSafeAssume50] {
        for class in ["light", "standard", "intensive", "unknown"] {
            let mut previous = DecisionLevel::Blocked;
            // Increasing remaining == decreasing usage.
            for used in (0..=100u8).rev() {
                let record = UsageRecord {
                    weekly_usage_percent: Some(used),
                    ..UsageRecord::default()
                };
                let level = engine(policy).evaluate(&record, class).level;
                assert!(
                    level >= previous,
                    "level dropped at used={used} class={class}: {previous:?} -> {level:?}"
                );
                previous = level;
            }
        }
    }
}

#[test]
fn test_threshold_boundaries_all_classes() {
    let table = ThresholdTable::default();
    for (class, required) in [("light", 10u8), ("standard", 25), ("intensive", 50)] {
        let at = |remaining: u8| {
            let record = UsageRecord {
                weekly_usage_percent: Some(100 - remaining),
                ..UsageRecord::default()
            };
            DecisionEngine::new(table, ErrorPolicy::FailOpen)
                .evaluate(&record, class)
                .level
        };

        assert_eq!(at(required), DecisionLevel::Approved, "{class} at required");
        let half_up = required.div_ceil(2);
        assert_eq!(at(half_up), DecisionLevel::Caution, "{class} at half");
        assert_eq!(at(half_up - 1), DecisionLevel::Blocked, "{class} below half");
    }
}
