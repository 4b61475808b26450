use serde::{Deserialize, Serialize};
use std::fmt;

pub type Key = String;
pub type Value = String;

/// Logical duration, measured in clock ticks.
pub type Ticks = u64;

/// A point on the engine's logical clock. Never decreases within a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalTime(pub u64);

impl LogicalTime {
    pub const ZERO: LogicalTime = LogicalTime(0);

    #[inline]
    #[must_use]
    pub fn plus(self, ticks: Ticks) -> LogicalTime {
        LogicalTime(self.0.saturating_add(ticks))
    }

    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LogicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
