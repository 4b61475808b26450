//! Backing store stub: an intent log plus the last durable value per key.
//! Nothing here performs I/O.

use crate::types::{Key, LogicalTime, Value};
use serde::Serialize;
use std::collections::HashMap;

/// What forced a pending write-back value out to the backing store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushCause {
    Explicit,
    Eviction,
    Expiry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackingWriteKind {
    WriteThrough,
    WriteAround,
    Flush(FlushCause),
}

/// One write applied to the backing store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BackingWrite {
    pub key: Key,
    pub value: Value,
    pub at: LogicalTime,
    pub kind: BackingWriteKind,
}

/// A write-back value scheduled but not yet applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingWrite {
    pub key: Key,
    pub value: Value,
    pub scheduled_at: LogicalTime,
}

#[derive(Debug, Clone, Default)]
pub struct BackingStore {
    writes: Vec<BackingWrite>,
    durable: HashMap<Key, Value>,
    pending: Vec<PendingWrite>,
}

impl BackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a write immediately and logs it.
    pub fn record_write(
        &mut self,
        key: &str,
        value: &str,
        at: LogicalTime,
        kind: BackingWriteKind,
    ) -> BackingWrite {
        let write = BackingWrite { key: key.to_owned(), value: value.to_owned(), at, kind };
        self.durable.insert(write.key.clone(), write.value.clone());
        self.writes.push(write.clone());
        write
    }

    /// Schedules a deferred write. Rewrites of a pending key replace its value
    /// and keep its place in the queue.
    pub fn schedule(&mut self, key: &str, value: &str, at: LogicalTime) {
        if let Some(p) = self.pending.iter_mut().find(|p| p.key == key) {
            p.value = value.to_owned();
            return;
        }
        self.pending.push(PendingWrite {
            key: key.to_owned(),
            value: value.to_owned(),
            scheduled_at: at,
        });
    }

    pub fn has_pending(&self, key: &str) -> bool {
        self.pending.iter().any(|p| p.key == key)
    }

    /// Applies the pending write for `key`, if any.
    pub fn flush_key(&mut self, key: &str, at: LogicalTime, cause: FlushCause) -> Option<BackingWrite> {
        let idx = self.pending.iter().position(|p| p.key == key)?;
        let p = self.pending.remove(idx);
        Some(self.record_write(&p.key, &p.value, at, BackingWriteKind::Flush(cause)))
    }

    /// Applies every pending write in scheduling order.
    pub fn drain_pending(&mut self, at: LogicalTime) -> Vec<BackingWrite> {
        let drained = std::mem::take(&mut self.pending);
        drained
            .into_iter()
            .map(|p| {
                self.record_write(&p.key, &p.value, at, BackingWriteKind::Flush(FlushCause::Explicit))
            })
            .collect()
    }

    pub fn pending(&self) -> &[PendingWrite] {
        &self.pending
    }

    /// Every applied write, in order.
    pub fn writes(&self) -> &[BackingWrite] {
        &self.writes
    }

    /// Last value that reached the backing store for `key`.
    pub fn durable_value(&self, key: &str) -> Option<&Value> {
        self.durable.get(key)
    }
}
