//! # Application Settings
//!
//! Where the database lives, as named connection strings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GROCERY_APP_DB="Data Source=grocery.db"                            │
//! │                                                                         │
//! │  2. TOML Settings File                                                 │
//! │     --config <path>, or                                                │
//! │     ~/.config/grocery-app/appsettings.toml (Linux)                     │
//! │     ~/Library/Application Support/nl.grocery.grocery-app/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no connection strings at all                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settings File Format
//! ```toml
//! # appsettings.toml
//! [connection_strings]
//! GroceryAppDb = "Data Source=grocery.db"
//! ```
//!
//! A missing `GroceryAppDb` entry is fatal at startup: nothing falls back
//! to a default database file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use grocery_core::CONNECTION_STRING_NAME;

/// Environment variable that overrides the `GroceryAppDb` connection string.
pub const CONNECTION_STRING_ENV: &str = "GROCERY_APP_DB";

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "appsettings.toml";

/// Settings read at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Connection strings by name.
    #[serde(default)]
    pub connection_strings: BTreeMap<String, String>,
}

impl AppSettings {
    /// Loads settings: defaults, then the file, then the environment.
    ///
    /// ## Arguments
    /// * `path` - Explicit settings file. When `None`, the file in the
    ///   platform config directory is used if it exists.
    ///
    /// An explicit path that does not exist is an error; a missing
    /// default file is not.
    pub fn load(path: Option<PathBuf>) -> DbResult<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                other => {
                    debug!(path = ?other, "No settings file, using defaults");
                    Self::default()
                }
            },
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Reads and parses a settings file.
    pub fn from_file(path: &Path) -> DbResult<Self> {
        info!(path = %path.display(), "Loading settings");

        let contents = std::fs::read_to_string(path).map_err(|e| DbError::InvalidSettings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| DbError::InvalidSettings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Applies overrides looked up through `lookup` (the environment in
    /// production, a closure in tests).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(CONNECTION_STRING_ENV) {
            debug!("Overriding {} from environment", CONNECTION_STRING_NAME);
            self.connection_strings
                .insert(CONNECTION_STRING_NAME.to_string(), value);
        }
    }

    /// Returns the default settings file location.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("nl", "grocery", "grocery-app")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Adds or replaces a connection string.
    pub fn with_connection_string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.connection_strings.insert(name.into(), value.into());
        self
    }

    /// Looks up a connection string by name.
    ///
    /// Blank entries count as missing.
    pub fn connection_string(&self, name: &str) -> DbResult<&str> {
        self.connection_strings
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| DbError::missing_connection_string(name))
    }
}

// =============================================================================
// Connection Strings
// =============================================================================

/// Translates a connection string into a sqlx SQLite URL.
///
/// ## Accepted Forms
/// ```text
/// sqlite://grocery.db?mode=rwc     → as is
/// sqlite::memory:                  → as is
/// Data Source=grocery.db           → sqlite://grocery.db?mode=rwc
/// Data Source=:memory:             → sqlite::memory:
/// grocery.db                       → sqlite://grocery.db?mode=rwc
/// ```
pub fn sqlite_url(connection_string: &str) -> DbResult<String> {
    let connection_string = connection_string.trim();

    if connection_string.starts_with("sqlite:") {
        return Ok(connection_string.to_string());
    }

    if !connection_string.contains('=') {
        return Ok(file_url(connection_string));
    }

    let data_source = connection_string
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| {
            let key = key.trim().to_ascii_lowercase();
            key == "data source" || key == "datasource" || key == "filename"
        })
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DbError::InvalidConnectionString {
            value: connection_string.to_string(),
            reason: "no Data Source".to_string(),
        })?;

    if data_source == ":memory:" {
        return Ok("sqlite::memory:".to_string());
    }

    Ok(file_url(data_source))
}

fn file_url(path: &str) -> String {
    format!("sqlite://{}?mode=rwc", path)
}

// =============================================================================
// Unit Tests
// =============================================================================
