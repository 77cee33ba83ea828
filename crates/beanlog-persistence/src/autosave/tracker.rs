//! Dirty state tracking for auto-save.

use std::time::Instant;

use super::AutoSaveConfig;

/// Tracks changes not yet written to the slot.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty: bool,
    last_change: Option<Instant>,
    /// Reset when saved.
    first_unsaved_change: Option<Instant>,
    saving: bool,
}

impl DirtyTracker {
    /// Create a new tracker with no unsaved changes.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn mark_dirty(&mut self) {
        let now = Instant::now();
        self.dirty = true;
        self.last_change = Some(now);
        if self.first_unsaved_change.is_none() {
            self.first_unsaved_change = Some(now);
        }
    }

    pub fn start_save(&mut self) {
        self.saving = true;
    }

    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.saving = false;
        self.first_unsaved_change = None;
    }

    /// The changes stay dirty so a later save retries them.
    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    pub fn ms_since_last_change(&self) -> Option<u64> {
        self.last_change.map(|t| t.elapsed().as_millis() as u64)
    }

    pub fn ms_since_first_unsaved(&self) -> Option<u64> {
        self.first_unsaved_change
            .map(|t| t.elapsed().as_millis() as u64)
    }

    /// Check if auto-save should trigger based on the config.
    pub fn should_auto_save(&self, config: &AutoSaveConfig) -> bool {
        if !self.dirty || self.saving || !config.enabled {
            return false;
        }

        match (self.ms_since_last_change(), self.ms_since_first_unsaved()) {
            (Some(since_last), Some(since_first)) => config.should_save(since_last, since_first),
            _ => false,
        }
    }
}
