use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};

/// Project-level configuration, loaded from `.lockbox.toml`.
///
/// Every field has a sensible default so Lockbox works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the
    /// database, key file, and audit log.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Database file name inside `data_dir`.
    #[serde(default = "default_db_file")]
    pub db_file: String,

    /// Key file name inside `data_dir`.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Record operations in `<data_dir>/audit.db`.
    #[serde(default = "default_audit")]
    pub audit: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".lockbox".to_string()
}

fn default_db_file() -> String {
    "sqlite_db.db".to_string()
}

fn default_key_file() -> String {
    "secret_key.skf".to_string()
}

fn default_audit() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file: default_db_file(),
            key_file: default_key_file(),
            audit: default_audit(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".lockbox.toml";

    /// Load settings from `<project_dir>/.lockbox.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the data directory.
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// Full path to the database file.
    ///
    /// Example: `project_dir/.lockbox/sqlite_db.db`
    pub fn db_path(&self, project_dir: &Path) -> PathBuf {
        self.data_path(project_dir).join(&self.db_file)
    }

    /// Full path to the key file.
    pub fn key_path(&self, project_dir: &Path) -> PathBuf {
        self.data_path(project_dir).join(&self.key_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
