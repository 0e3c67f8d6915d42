//! Configuration handling for form fields

use crate::error::{FormError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default currency symbol prepended to formatted amounts
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Default locale
pub const DEFAULT_LOCALE: &str = "en_US";

/// Settings shared by every field of a form
///
/// Passed explicitly into normalization and validation through
/// [`crate::fields::FieldContext`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Currency symbol used by currency fields
    pub currency_symbol: Option<String>,
    /// Locale used for translation lookups
    pub locale: Option<String>,
    /// JSON translation catalog (`{"Key": "Text"}`), or a directory of
    /// catalogs named `<locale>.json`
    pub translations: Option<PathBuf>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "formfields", "formfields")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FormError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: FormConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded form config from {}", path.display());
        Ok(config)
    }

    /// Reject values no field could work with
    pub fn validate(&self) -> Result<()> {
        if let Some(symbol) = &self.currency_symbol {
            if symbol.trim().is_empty() {
                return Err(FormError::InvalidConfig(
                    "currency_symbol must not be empty".to_string(),
                ));
            }
            if symbol.chars().any(|c| c.is_ascii_digit() || c == '.' || c == '-') {
                return Err(FormError::InvalidConfig(format!(
                    "currency_symbol '{symbol}' must not contain digits, '.' or '-'"
                )));
            }
        }
        Ok(())
    }

    /// Configured currency symbol, or `$`
    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    /// Configured locale, or `en_US`
    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// Catalog file for the configured locale
    ///
    /// A directory resolves to `<dir>/<locale>.json`; any other path is used
    /// as is.
    pub fn translations_file(&self) -> Option<PathBuf> {
        let path = self.translations.as_ref()?;
        if path.is_dir() {
            Some(path.join(format!("{}.json", self.locale())))
        } else {
            Some(path.clone())
        }
    }
}
