//! Text output formatting with progress bars and colors.

use chrono::NaiveDateTime;
use kimiguard_core::{CapacityTier, Decision, DecisionLevel, OperationClass, UsageRecord};
use kimiguard_store::Settings;
use std::path::Path;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';
const BAR_WIDTH: usize = 10;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the usage report, or the error block for a failed record.
    pub fn format_usage(&self, record: &UsageRecord) -> String {
        if record.is_error() {
            return self.format_error(record);
        }

        let mut lines = vec![self.bold("Kimi Usage Monitor"), "=".repeat(40)];

        if let Some(used) = record.weekly_usage_percent {
            let remaining = 100 - used.min(100);
            let tier = CapacityTier::from_remaining(remaining);

            lines.push(String::new());
            lines.push(self.bold("Weekly Usage"));
            lines.push(format!("   Used:      {used}%"));
            lines.push(format!(
                "   Remaining: {} {}",
                self.progress_bar(remaining),
                self.color_for_tier(tier, &format!("{remaining}%"))
            ));
            lines.push(format!("   Resets in: {}", format_hours(record.weekly_resets_hours)));
            lines.push(format!(
                "   Status:    {}",
                self.color_for_tier(tier, tier.status_label())
            ));
        }

        if let Some(used) = record.rate_limit_percent {
            lines.push(String::new());
            lines.push(self.bold("Rate Limit"));
            lines.push(format!("   Used:      {used}%"));
            lines.push(format!(
                "   Resets in: {}",
                format_hours(record.rate_limit_resets_hours)
            ));
        }

        if record.weekly_usage_percent.is_none() && record.rate_limit_percent.is_none() {
            lines.push(String::new());
            lines.push(self.dim("No usage figures found in the console snapshot"));
        }

        if let Some(ts) = record.timestamp {
            lines.push(String::new());
            lines.push(self.dim(&format!("Checked {}", format_timestamp(ts))));
        }

        lines.join("\n")
    }

    /// Formats an error record with its remediation hint.
    pub fn format_error(&self, record: &UsageRecord) -> String {
        let error = record.error.as_deref().unwrap_or("Unknown error");
        let mut out = format!("{} {}", self.red("✗"), error);
        if let Some(message) = &record.message {
            out.push_str(&format!("\n   {}", self.dim(message)));
        }
        out
    }

    /// Formats a preflight decision.
    pub fn format_decision(&self, decision: &Decision) -> String {
        format!("{} {}", self.level_symbol(decision.level), decision.message)
    }

    /// Formats the guard verdict.
    pub fn format_guard(&self, can_spawn: bool, detail: &str) -> String {
        if can_spawn {
            format!("{} Subagent spawn allowed: {detail}", self.green("✓"))
        } else {
            format!("{} Subagent spawn denied: {detail}", self.red("✗"))
        }
    }

    /// Formats a capacity recommendation.
    pub fn format_recommendation(&self, tier: CapacityTier) -> String {
        let symbol = match tier {
            CapacityTier::High => self.green("✓"),
            CapacityTier::Moderate | CapacityTier::Unknown => self.yellow("!"),
            CapacityTier::Low => self.red("✗"),
        };
        format!("{symbol} {}", tier.recommendation())
    }

    /// Formats the settings listing for `config show`.
    pub fn format_settings(&self, settings: &Settings, path: &Path) -> String {
        let mut lines = vec![self.bold("KimiGuard Configuration"), "─".repeat(40), String::new()];

        lines.push("Thresholds (required remaining):".to_string());
        for class in OperationClass::ALL {
            lines.push(format!(
                "  • {:<10} {}%",
                class.as_str(),
                settings.thresholds.required_for(class)
            ));
        }
        lines.push(String::new());
        lines.push(format!("Preflight on error: {}", settings.preflight_policy));
        lines.push(format!("Guard on error:     {}", settings.guard_policy));
        lines.push(format!("Guard class:        {}", settings.guard_class));
        lines.push(String::new());
        lines.push("Browser:".to_string());
        lines.push(format!("  binary:       {}", settings.browser.binary));
        lines.push(format!("  console host: {}", settings.browser.console_host));
        lines.push(format!("  console url:  {}", self.cyan(&settings.browser.console_url)));
        lines.push(format!("  timeout:      {}s", settings.browser.timeout_secs));
        lines.push(String::new());
        lines.push(format!("Log level: {}", settings.log_level));
        lines.push(self.dim(&format!("File: {}", path.display())));

        lines.join("\n")
    }

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent_remaining: u8) -> String {
        let percent = usize::from(percent_remaining.min(100));
        let filled = (percent * BAR_WIDTH + 50) / 100;
        let empty = BAR_WIDTH.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_tier(CapacityTier::from_remaining(percent_remaining), &bar)
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn level_symbol(&self, level: DecisionLevel) -> String {
        match level {
            DecisionLevel::Approved => self.green("✓"),
            DecisionLevel::Caution => self.yellow("!"),
            DecisionLevel::Blocked => self.red("✗"),
        }
    }

    fn color_for_tier(&self, tier: CapacityTier, text: &str) -> String {
        match tier {
            CapacityTier::High => self.green(text),
            CapacityTier::Moderate | CapacityTier::Unknown => self.yellow(text),
            CapacityTier::Low => self.red(text),
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// "30 hours", "1 hour", or "unknown".
pub fn format_hours(hours: Option<u32>) -> String {
    match hours {
        Some(1) => "1 hour".to_string(),
        Some(h) => format!("{h} hours"),
        None => "unknown".to_string(),
    }
}

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
