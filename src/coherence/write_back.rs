use super::{BackingStore, CacheAction, CoherenceProtocol, WriteOutcome};
use crate::cache::{CoherenceKind, DirtyState, EntryStore};
use crate::trace::TraceEvent;
use crate::types::{LogicalTime, Value};

/// The cache takes the write now; the backing store gets it on flush, or when
/// the dirty entry is evicted or expires.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteBack;

impl CoherenceProtocol for WriteBack {
    fn kind(&self) -> CoherenceKind {
        CoherenceKind::WriteBack
    }

    fn on_write(
        &self,
        key: &str,
        value: &Value,
        now: LogicalTime,
        _store: &mut EntryStore,
        backing: &mut BackingStore,
    ) -> WriteOutcome {
        backing.schedule(key, value, now);
        log::debug!(target: "cachesim::trace", "write-back scheduled key={key} at={now}");
        WriteOutcome {
            action: CacheAction::Admit(DirtyState::Dirty),
            events: vec![TraceEvent::WriteBackScheduled { key: key.to_owned() }],
        }
    }
}
