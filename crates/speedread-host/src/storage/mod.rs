//! Settings persistence on the host filesystem.

pub mod json_settings;

pub use json_settings::{JsonSettingsStore, SettingsFileError};
