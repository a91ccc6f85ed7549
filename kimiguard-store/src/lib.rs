// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # KimiGuard Store
//!
//! Settings persistence for KimiGuard.
//!
//! This crate provides:
//!
//! - **Settings**: Thresholds, error policies and browser settings
//! - **SettingsStore**: Settings bound to their file, with validated updates
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use kimiguard_store::{Settings, SettingsStore, default_settings_path};
//! use kimiguard_core::OperationClass;
//!
//! let path = default_settings_path();
//! let mut store = SettingsStore::new(Settings::load_from(&path).await?, path);
//! store.update(|s| s.thresholds.set(OperationClass::Intensive, 60))?;
//! store.save().await?;
//! ```

pub mod error;
pub mod persistence;
pub mod settings;

pub use error::StoreError;
pub use persistence::{default_config_dir, default_settings_path, load_json, save_json};
pub use settings::{BrowserSettings, LogLevel, PolicyTarget, Settings, SettingsStore};
