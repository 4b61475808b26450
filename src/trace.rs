//! Trace events: the ordered, append-only record of what the engine did.

use crate::types::Key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an entry left the cache through the eviction path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionReason {
    /// Chosen by the eviction policy to make room for a new key.
    Capacity,
    /// Dropped by write-around so a stale copy is never served.
    Invalidated,
}

impl EvictionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EvictionReason::Capacity => "capacity",
            EvictionReason::Invalidated => "invalidated",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Hit { key: Key },
    Miss { key: Key },
    Admitted { key: Key },
    Evicted { key: Key, reason: EvictionReason },
    WriteThrough { key: Key },
    WriteBackScheduled { key: Key },
    WriteAround { key: Key },
    Expired { key: Key },
    Flushed { key: Key },
}

impl TraceEvent {
    pub fn key(&self) -> &Key {
        match self {
            TraceEvent::Hit { key }
            | TraceEvent::Miss { key }
            | TraceEvent::Admitted { key }
            | TraceEvent::Evicted { key, .. }
            | TraceEvent::WriteThrough { key }
            | TraceEvent::WriteBackScheduled { key }
            | TraceEvent::WriteAround { key }
            | TraceEvent::Expired { key }
            | TraceEvent::Flushed { key } => key,
        }
    }

    /// Stable snake_case name, matching the serialized `event` tag.
    pub fn name(&self) -> &'static str {
        match self {
            TraceEvent::Hit { .. } => "hit",
            TraceEvent::Miss { .. } => "miss",
            TraceEvent::Admitted { .. } => "admitted",
            TraceEvent::Evicted { .. } => "evicted",
            TraceEvent::WriteThrough { .. } => "write_through",
            TraceEvent::WriteBackScheduled { .. } => "write_back_scheduled",
            TraceEvent::WriteAround { .. } => "write_around",
            TraceEvent::Expired { .. } => "expired",
            TraceEvent::Flushed { .. } => "flushed",
        }
    }

    pub fn reason(&self) -> Option<EvictionReason> {
        match self {
            TraceEvent::Evicted { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub fn hit(key: &str) -> Self {
        TraceEvent::Hit { key: key.to_owned() }
    }

    pub fn miss(key: &str) -> Self {
        TraceEvent::Miss { key: key.to_owned() }
    }

    pub fn admitted(key: &str) -> Self {
        TraceEvent::Admitted { key: key.to_owned() }
    }

    pub fn evicted(key: &str, reason: EvictionReason) -> Self {
        TraceEvent::Evicted { key: key.to_owned(), reason }
    }

    pub fn expired(key: &str) -> Self {
        TraceEvent::Expired { key: key.to_owned() }
    }

    pub fn flushed(key: &str) -> Self {
        TraceEvent::Flushed { key: key.to_owned() }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(r) => write!(f, "{}({}, {})", self.name(), self.key(), r.as_str()),
            None => write!(f, "{}({})", self.name(), self.key()),
        }
    }
}
