use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{Result, SettingsError};

/// Environment variable holding an API token; wins over the stored token
pub const TOKEN_ENV: &str = "TURSO_API_TOKEN";

/// Environment variable pointing at an alternate settings file
pub const SETTINGS_FILE_ENV: &str = "TURSOCTL_SETTINGS_FILE";

/// Main settings structure
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Settings {
    /// Platform API token saved by `auth set-token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Database names from the last `db list`; cleared whenever a database goes away
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_names: Option<Vec<String>>,
    /// Credentials keyed by database ID (older files key them by database name)
    #[serde(default)]
    pub databases: BTreeMap<String, DatabaseSettings>,
}

/// Credentials embedded into connection URLs for one database
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    /// Name of the database the entry belongs to, so it can be evicted by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl Settings {
    /// Load settings from the standard location
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;
        Self::load_from_path(&path)
    }

    /// Load settings from a specific path; a missing file yields defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to the standard location
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;
        self.save_to_path(&path)
    }

    /// Save settings to a specific path, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Standard settings file path for this platform
    pub fn settings_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("io", "turso", "tursoctl").ok_or(SettingsError::SettingsDirError)?;
        Ok(proj_dirs.config_dir().join("settings.toml"))
    }

    /// Token from `TURSO_API_TOKEN`, falling back to the stored one
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }

    /// Look up credentials by key (database ID, or name for older files)
    pub fn database_settings(&self, key: &str) -> Option<&DatabaseSettings> {
        self.databases.get(key)
    }

    pub fn set_database_settings(&mut self, key: String, settings: DatabaseSettings) {
        self.databases.insert(key, settings);
    }

    /// Remove every credential entry belonging to the named database
    ///
    /// Matches entries keyed by the name and entries that recorded the name.
    /// Returns how many entries were removed.
    pub fn delete_database(&mut self, name: &str) -> usize {
        let before = self.databases.len();
        self.databases
            .retain(|key, entry| key != name && entry.database.as_deref() != Some(name));
        before - self.databases.len()
    }

    pub fn db_names_cache(&self) -> Option<&[String]> {
        self.db_names.as_deref()
    }

    pub fn set_db_names_cache(&mut self, names: Vec<String>) {
        self.db_names = Some(names);
    }

    pub fn invalidate_db_names_cache(&mut self) {
        self.db_names = None;
    }
}
