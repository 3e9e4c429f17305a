//! Configuration module for colexpr.
//!
//! Handles the TOML settings file: dialect selection, phrase overrides,
//! render flags and log level.

mod settings;

pub use settings::{DialectSettings, LogSettings, RenderSettings, Settings, SettingsError};
