//! Core error types for `KimiGuard`.

use thiserror::Error;

/// Core error type for `KimiGuard` operations.
///
/// Parsing and decisions never fail; these errors come from validating
/// caller-supplied configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
