//! Application state for the bean log.
//!
//! `App` owns the bean/shot snapshot and the current view. Every user action
//! goes through one of its methods, which updates the snapshot, moves the
//! view, and hands the new state to the injected slot store.
//!
//! # Architecture
//!
//! - `app` - The `App` state object and its mutation API
//! - `view` - Screens and the navigation rules between them
//! - `screen` - Data each screen renders, borrowed from the snapshot
//! - `confirm` - Confirmation gate for destructive actions
//! - `clock` - Time source for ids' timestamps and backup dates
//! - `options` - Behavior switches loaded from settings

mod app;
mod clock;
mod confirm;
mod error;
mod options;
mod screen;
mod view;

pub use app::{App, Decision};
pub use clock::{Clock, ManualClock, SystemClock};
pub use confirm::{AssumeNo, AssumeYes, Confirm, ConfirmPrompt};
pub use error::{CoreError, Result};
pub use options::{AfterAddBean, AppOptions};
pub use screen::Screen;
pub use view::{Navigate, View};
