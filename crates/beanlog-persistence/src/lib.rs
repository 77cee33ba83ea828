//! Persistent storage for the bean log.
//!
//! The whole application state is one JSON document, `{beans, shots}`,
//! kept in a single named slot of a key-value store. The in-memory state is
//! always authoritative; this crate only keeps a copy of it.
//!
//! # Features
//!
//! - **Pluggable slots** via the `SlotStore` trait (directory or in-memory)
//! - **Atomic writes** to prevent a half-written slot or backup
//! - **Forgiving load**: unreadable records are skipped, never an error, and
//!   the raw slot is kept aside before anything is lost
//! - **Strict import**: backups are schema- and invariant-checked before use
//! - **Auto-save** with debounce support
//!
//! # Storage Format
//!
//! ```text
//! <data_dir>/bean_log_data_v1.json          {"beans":[...],"shots":[...]}
//! <data_dir>/bean_log_data_v1.corrupt.json  raw copy of a slot that failed to load
//! beanlog-backup-2024-05-01.json            same document, pretty-printed
//! ```
//!
//! The schema version lives in the slot key. There is no migration: a new
//! key starts from an empty state.
//!
//! # Example
//!
//! ```ignore
//! use beanlog_persistence::{DirSlotStore, load_snapshot, save_snapshot};
//!
//! let mut slot = DirSlotStore::new("/home/me/.local/share/beanlog");
//! let snapshot = load_snapshot(&mut slot);
//! save_snapshot(&mut slot, &snapshot)?;
//! ```
//!
//! # Architecture
//!
//! - `slot/` - Key-value slot trait and its implementations
//! - `io/` - Snapshot load/save, backup export/import, atomic file writes
//! - `autosave/` - Auto-save infrastructure (DirtyTracker, config)
//! - `error.rs` - Error types with user-friendly messages

mod autosave;
mod error;
mod io;
mod slot;

pub use autosave::{AutoSaveConfig, DirtyTracker};
pub use error::{PersistenceError, Result};
pub use io::{
    BACKUP_PREFIX, Backup, backup_file_name, export_snapshot, import_snapshot, load_snapshot,
    read_backup, save_snapshot, write_atomic,
};
pub use slot::{DirSlotStore, MemorySlotStore, RESCUE_KEY, STORAGE_KEY, SlotStore};
