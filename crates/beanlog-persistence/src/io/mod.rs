//! File and slot I/O for the bean log.
//!
//! This module handles:
//! - Loading and saving the snapshot slot
//! - Exporting and importing backup files
//! - Atomic file writes

mod atomic;
mod backup;
mod snapshot;

pub use atomic::write_atomic;
pub use backup::{BACKUP_PREFIX, Backup, backup_file_name, export_snapshot, import_snapshot, read_backup};
pub use snapshot::{load_snapshot, save_snapshot};
