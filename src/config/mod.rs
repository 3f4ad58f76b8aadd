//! # Configuration Module
//!
//! Compression options with validation, plus the persisted application
//! settings (Memos endpoint, token, auto-upload).

pub mod config;
pub mod settings;

pub use config::CompressConfig;
pub use settings::{Settings, SettingsUpdate};
