//! Slots stored as files in a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SlotStore;
use crate::error::{PersistenceError, Result};
use crate::io::write_atomic;

/// One `<key>.json` file per slot under `root`.
#[derive(Debug, Clone)]
pub struct DirSlotStore {
    root: PathBuf,
}

impl DirSlotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl SlotStore for DirSlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(PersistenceError::Io {
                operation: "read",
                path,
                source: error,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.slot_path(key), value.as_bytes())
    }
}
