//! Durable key-value slots.
//!
//! The application keeps its whole state under one key. Implementations
//! decide where the value lives; callers never see anything but strings.

mod dir;
mod memory;

pub use dir::DirSlotStore;
pub use memory::MemorySlotStore;

use crate::error::Result;

/// Slot holding the `{beans, shots}` document.
///
/// The trailing version is the only schema marker. Changing it starts a new,
/// empty slot and leaves the old one untouched.
pub const STORAGE_KEY: &str = "bean_log_data_v1";

/// Copy of a [`STORAGE_KEY`] value that could not be loaded in full.
pub const RESCUE_KEY: &str = "bean_log_data_v1.corrupt";

/// A string-valued key-value store.
pub trait SlotStore {
    /// Read a slot, `Ok(None)` when it was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
