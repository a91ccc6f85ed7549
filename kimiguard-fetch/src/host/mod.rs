//! Host APIs for KimiGuard fetch strategies.
//!
//! - [`process`] - Subprocess execution for CLI tools
//! - [`browser`] - The `openclaw` browser automation CLI

pub mod browser;
pub mod process;

// Re-export key types
pub use browser::OpenClawBrowser;
pub use process::{ProcessOutput, ProcessRunner};
