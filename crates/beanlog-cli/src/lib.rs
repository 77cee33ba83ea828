//! CLI library components for the bean log.

pub mod confirm;
pub mod logging;
pub mod lookup;
pub mod render;
pub mod settings;
