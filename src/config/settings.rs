//! TOML-based configuration for colexpr.
//!
//! Example configuration:
//! ```toml
//! [dialect]
//! base = "oracle"
//!
//! [dialect.phrases]
//! concat_expr = " || "
//! func_upper = "upper(?)"
//!
//! [render]
//! alias = true
//! full_names = false
//!
//! [log]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::{Context, Dialect, ExprError, Phrase, PhraseTable};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Unknown phrase key: {0}")]
    UnknownPhrase(String),

    #[error("Invalid phrase override: {0}")]
    InvalidPhrase(#[from] ExprError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Dialect and phrase overrides.
    pub dialect: DialectSettings,

    /// Default render flags.
    pub render: RenderSettings,

    /// Logging configuration.
    pub log: LogSettings,
}

/// Dialect selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DialectSettings {
    /// Built-in dialect name (generic, oracle, sqlserver, mysql, postgres,
    /// sqlite, hsql).
    pub base: String,

    /// Phrase key (e.g. `func_upper`) to template.
    pub phrases: BTreeMap<String, String>,
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self {
            base: Dialect::Generic.to_string(),
            phrases: BTreeMap::new(),
        }
    }
}

/// Render flags applied to top-level expressions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Emit `AS alias` for aliased expressions.
    pub alias: bool,

    /// Qualify columns with their table alias.
    pub full_names: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            alias: false,
            full_names: true,
        }
    }
}

impl RenderSettings {
    pub fn context(&self) -> Context {
        let mut ctx = Context::NAME | Context::VALUE;
        if self.full_names {
            ctx = ctx.with(Context::FULLNAME);
        }
        if self.alias {
            ctx = ctx.with(Context::ALIAS);
        }
        ctx
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// flexi_logger spec, e.g. `warn` or `colexpr=debug`.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `COLEXPR_CONFIG`
    /// 2. `./colexpr.toml`
    /// 3. `~/.config/colexpr/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("COLEXPR_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("colexpr.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("colexpr").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Settings::default())
    }

    /// The configured base dialect.
    pub fn base_dialect(&self) -> Result<Dialect, SettingsError> {
        self.dialect
            .base
            .parse()
            .map_err(|_| SettingsError::UnknownDialect(self.dialect.base.clone()))
    }

    /// Build the configured dialect, validating every override.
    pub fn dialect(&self) -> Result<PhraseTable, SettingsError> {
        let base = self.base_dialect()?;
        let overrides = self
            .dialect
            .phrases
            .iter()
            .map(|(key, template)| {
                Phrase::from_key(key)
                    .map(|phrase| (phrase, template.clone()))
                    .ok_or_else(|| SettingsError::UnknownPhrase(key.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PhraseTable::from_overrides(base, overrides)?)
    }
}
