//! # Configuration
//!
//! Service configuration, read from an optional JSON file and then
//! overridden by environment variables:
//!
//! | Variable                 | Field                        |
//! |--------------------------|------------------------------|
//! | `HOST`                   | `server.host`                |
//! | `PORT`                   | `server.port`                |
//! | `CORS_ORIGINS`           | `server.cors_origins` (comma separated) |
//! | `SPREADSHEET_ID`         | `sheets.spreadsheet_id`      |
//! | `SHEET_RANGE`            | `sheets.range`               |
//! | `SHEET_ID`               | `sheets.sheet_id`            |
//! | `GOOGLE_API_KEY`         | `sheets.api_key`             |
//! | `GOOGLE_SERVICE_ACCOUNT` | `sheets.service_account` (base64 JSON) |
//! | `THEME_FILE`             | `preferences.theme_file`     |

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::table::SheetRange;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Missing setting: {0}")]
    Missing(&'static str),
}

/// Spreadsheet connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet identifier from the sheet URL
    #[serde(default)]
    pub spreadsheet_id: String,

    /// A1 range holding the table (default: "Sheet1")
    #[serde(default = "default_range")]
    pub range: String,

    /// Numeric id of the sheet tab, used for row deletion (default: 0)
    #[serde(default)]
    pub sheet_id: i64,

    /// API key for read-only access
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base64-encoded service account JSON for read/write access
    #[serde(default)]
    pub service_account: Option<String>,
}

fn default_range() -> String {
    "Sheet1".to_string()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            range: default_range(),
            sheet_id: 0,
            api_key: None,
            service_account: None,
        }
    }
}

impl SheetsConfig {
    pub fn sheet_range(&self) -> ConfigResult<SheetRange> {
        SheetRange::parse(&self.range).map_err(|_| ConfigError::InvalidValue {
            key: "sheets.range",
            value: self.range.clone(),
        })
    }
}

/// Theme preference settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// File the theme preference is saved to; in-memory when unset
    #[serde(default)]
    pub theme_file: Option<PathBuf>,

    /// Theme used when no preference was saved
    #[serde(default)]
    pub prefers_dark: bool,
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub sheets: SheetsConfig,

    #[serde(default)]
    pub preferences: PreferencesConfig,
}

impl AppConfig {
    /// Read a JSON config file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from an optional file, then apply process environment overrides
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup`; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            self.server.set_cors_origins(&origins);
        }
        if let Some(id) = get("SPREADSHEET_ID") {
            self.sheets.spreadsheet_id = id;
        }
        if let Some(range) = get("SHEET_RANGE") {
            self.sheets.range = range;
        }
        if let Some(sheet_id) = get("SHEET_ID") {
            self.sheets.sheet_id =
                sheet_id.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "SHEET_ID",
                    value: sheet_id.clone(),
                })?;
        }
        if let Some(key) = get("GOOGLE_API_KEY") {
            self.sheets.api_key = Some(key);
        }
        if let Some(account) = get("GOOGLE_SERVICE_ACCOUNT") {
            self.sheets.service_account = Some(account);
        }
        if let Some(path) = get("THEME_FILE") {
            self.preferences.theme_file = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Check the settings needed to reach the spreadsheet
    pub fn validate_sheets(&self) -> ConfigResult<()> {
        if self.sheets.spreadsheet_id.trim().is_empty() {
            return Err(ConfigError::Missing("SPREADSHEET_ID"));
        }
        if self.sheets.service_account.is_none() && self.sheets.api_key.is_none() {
            return Err(ConfigError::Missing(
                "GOOGLE_SERVICE_ACCOUNT or GOOGLE_API_KEY",
            ));
        }
        self.sheets.sheet_range()?;
        Ok(())
    }
}
