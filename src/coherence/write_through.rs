use super::{BackingStore, BackingWriteKind, CacheAction, CoherenceProtocol, WriteOutcome};
use crate::cache::{CoherenceKind, DirtyState, EntryStore};
use crate::trace::TraceEvent;
use crate::types::{LogicalTime, Value};

/// Writes land in the backing store in the same logical step as the cache,
/// so entries are always clean.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteThrough;

impl CoherenceProtocol for WriteThrough {
    fn kind(&self) -> CoherenceKind {
        CoherenceKind::WriteThrough
    }

    fn on_write(
        &self,
        key: &str,
        value: &Value,
        now: LogicalTime,
        _store: &mut EntryStore,
        backing: &mut BackingStore,
    ) -> WriteOutcome {
        backing.record_write(key, value, now, BackingWriteKind::WriteThrough);
        WriteOutcome {
            action: CacheAction::Admit(DirtyState::Clean),
            events: vec![TraceEvent::WriteThrough { key: key.to_owned() }],
        }
    }
}
