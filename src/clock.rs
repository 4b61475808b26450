//! Monotonic logical clock driving recency, insertion order and expiry.

use crate::types::{LogicalTime, Ticks};

#[derive(Debug, Clone, Default)]
pub struct LogicalClock {
    now: LogicalTime,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self { now: LogicalTime::ZERO }
    }

    /// Current time without advancing.
    #[inline]
    pub fn now(&self) -> LogicalTime {
        self.now
    }

    /// Advance by one tick and return the new time. Used to stamp each operation.
    pub fn tick(&mut self) -> LogicalTime {
        self.now = self.now.plus(1);
        self.now
    }

    /// Advance by `ticks` without stamping an operation.
    pub fn advance(&mut self, ticks: Ticks) -> LogicalTime {
        self.now = self.now.plus(ticks);
        self.now
    }
}
