//! User settings - persisted preferences.
//!
//! Read once at startup from a TOML file in the platform config directory.
//! A missing or unreadable file means defaults; command-line flags override
//! whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use beanlog_core::{AfterAddBean, AppOptions};
use beanlog_model::ShotOrder;
use beanlog_persistence::AutoSaveConfig;
use serde::{Deserialize, Serialize};

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "beanlog";
const APPLICATION: &str = "beanlog";

// =============================================================================
// ROOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub autosave: AutoSaveConfig,
    pub display: DisplaySettings,
    pub backup: BackupSettings,
}

impl Settings {
    /// Load settings from a specific path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "no settings file, using defaults");
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "ignoring unreadable settings file");
            Self::default()
        })
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("failed to write settings to {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize settings")
    }

    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Where the bean log slot lives.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// Where exported backups go by default.
    pub fn backup_dir(&self) -> PathBuf {
        self.backup.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            after_add_bean: self.display.after_add_bean,
            shot_order: self.display.shot_order,
            autosave: self.autosave.clone(),
        }
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the bean log slot. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub shot_order: ShotOrder,
    pub after_add_bean: AfterAddBean,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    /// Export directory. Current directory when unset.
    pub dir: Option<PathBuf>,
}
