//! Auto-save configuration.

use serde::{Deserialize, Serialize};

/// Configuration for auto-save behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    /// Whether auto-save is enabled.
    pub enabled: bool,

    /// Debounce delay in milliseconds.
    ///
    /// After a change, the system waits this long before saving.
    /// Additional changes reset the timer. Zero saves after every change.
    pub debounce_ms: u64,

    /// Maximum delay before forcing a save.
    ///
    /// If changes keep coming, save after this many milliseconds
    /// since the first unsaved change.
    pub max_delay_ms: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 0,
            max_delay_ms: 30_000,
        }
    }
}

impl AutoSaveConfig {
    /// Create a disabled auto-save config.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Create a config that waits `debounce_ms` after the last change.
    pub fn debounced(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            ..Default::default()
        }
    }

    /// Check if auto-save should trigger given the time since last change
    /// and time since first unsaved change.
    pub fn should_save(&self, since_last_change_ms: u64, since_first_unsaved_ms: u64) -> bool {
        if !self.enabled {
            return false;
        }

        if since_last_change_ms >= self.debounce_ms {
            return true;
        }

        since_first_unsaved_ms >= self.max_delay_ms
    }
}
