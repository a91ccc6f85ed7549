//! Output formatting for CLI.

mod json;
mod text;

pub use json::{GuardFallbackOutput, GuardOutput, JsonFormatter, LogOutput, PreflightOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
