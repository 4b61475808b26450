use crate::types::{Key, LogicalTime, Value};
use serde::{Deserialize, Serialize};

/// Coherence state of a cached value relative to the backing store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirtyState {
    #[default]
    Clean,
    /// Written under write-back and not yet flushed.
    Dirty,
}

/// Represents an entry in the cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: Key,
    pub value: Value,
    pub inserted_at: LogicalTime,
    /// Admission order within the store; strictly increasing even when the clock saturates.
    pub seq: u64,
    pub last_accessed_at: LogicalTime,
    pub access_count: u64,
    pub expires_at: Option<LogicalTime>,
    pub state: DirtyState,
}

impl CacheEntry {
    #[must_use]
    pub(crate) fn new(
        key: Key,
        value: Value,
        now: LogicalTime,
        seq: u64,
        expires_at: Option<LogicalTime>,
        state: DirtyState,
    ) -> Self {
        Self {
            key,
            value,
            inserted_at: now,
            seq,
            last_accessed_at: now,
            access_count: 1,
            expires_at,
            state,
        }
    }

    /// Expired once the clock reaches `expires_at`.
    #[inline]
    pub fn is_expired(&self, now: LogicalTime) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.state == DirtyState::Dirty
    }

    pub(crate) fn touch(&mut self, now: LogicalTime) {
        self.last_accessed_at = now;
        self.access_count = self.access_count.saturating_add(1);
    }
}
