use super::{BackingStore, BackingWriteKind, CacheAction, CoherenceProtocol, WriteOutcome};
use crate::cache::{CoherenceKind, EntryStore};
use crate::trace::{EvictionReason, TraceEvent};
use crate::types::{LogicalTime, Value};

/// Writes bypass the cache. A cached copy of the key is invalidated so the
/// next read misses instead of serving stale data.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteAround;

impl CoherenceProtocol for WriteAround {
    fn kind(&self) -> CoherenceKind {
        CoherenceKind::WriteAround
    }

    fn on_write(
        &self,
        key: &str,
        value: &Value,
        now: LogicalTime,
        store: &mut EntryStore,
        backing: &mut BackingStore,
    ) -> WriteOutcome {
        backing.record_write(key, value, now, BackingWriteKind::WriteAround);
        let mut events = vec![TraceEvent::WriteAround { key: key.to_owned() }];
        if store.remove(key).is_some() {
            events.push(TraceEvent::evicted(key, EvictionReason::Invalidated));
        }
        WriteOutcome { action: CacheAction::Bypass, events }
    }
}
