//! Store configuration.
//!
//! [`StoreConfig`] is read from TOML. Every field has a default, so a config
//! file only needs the settings it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Conventional location of the missing-translation catalog.
pub const DEFAULT_CATALOG_PATH: &str = "config/missing_translations.yml";

/// Configuration for persisting missing translations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the YAML catalog file.
    pub catalog_path: PathBuf,
    /// Locale flushed when the caller does not name one.
    pub default_locale: String,
    /// Locales that receive empty placeholders for every flushed key.
    pub duplicate_to_locales: Vec<String>,
    /// Separator between segments of dotted keys.
    pub separator: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            default_locale: "en".to_string(),
            duplicate_to_locales: Vec::new(),
            separator: ".".to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from TOML text. Missing fields take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.default_locale.is_empty() {
            return Err(StoreError::Config("default_locale must not be empty".into()));
        }
        if self.separator.is_empty() {
            return Err(StoreError::Config("separator must not be empty".into()));
        }
        if self.catalog_path.as_os_str().is_empty() {
            return Err(StoreError::Config("catalog_path must not be empty".into()));
        }
        Ok(())
    }
}
