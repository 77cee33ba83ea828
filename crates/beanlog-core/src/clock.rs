//! Time sources.

use std::cell::Cell;

use chrono::{DateTime, NaiveDate, Utc};

/// Wall-clock access for creation timestamps and backup dates.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;

    /// Today's date in UTC, as used in backup file names.
    fn today(&self) -> NaiveDate {
        DateTime::from_timestamp_millis(self.now_ms())
            .unwrap_or_default()
            .date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
///
/// Each reading advances it by `step_ms`, so consecutive entities get
/// distinct, increasing timestamps.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Cell<i64>,
    step_ms: i64,
}

impl ManualClock {
    pub fn starting_at(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            step_ms: 1,
        }
    }

    #[must_use]
    pub fn with_step(mut self, step_ms: i64) -> Self {
        self.step_ms = step_ms;
        self
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn peek(&self) -> i64 {
        self.now_ms.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        let now = self.now_ms.get();
        self.now_ms.set(now + self.step_ms);
        now
    }

    fn today(&self) -> NaiveDate {
        DateTime::from_timestamp_millis(self.now_ms.get())
            .unwrap_or_default()
            .date_naive()
    }
}
