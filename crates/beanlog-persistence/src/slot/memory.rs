//! In-memory slots.

use std::collections::BTreeMap;

use super::SlotStore;
use crate::error::{PersistenceError, Result};

/// Slots kept in memory, optionally with a per-value size limit.
///
/// Nothing survives the process; used for throwaway sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse values longer than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seed a slot without going through the quota check.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(PersistenceError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    quota,
                });
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
