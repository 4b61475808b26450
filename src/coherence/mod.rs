//! Write-coherence protocols.
//!
//! A protocol decides, for each `put`, what happens on the backing store and
//! whether the cache side should admit the value. The engine then performs any
//! eviction and the admission itself, so ordering stays in one place.

mod backing;
mod write_around;
mod write_back;
mod write_through;

pub use backing::{BackingStore, BackingWrite, BackingWriteKind, FlushCause, PendingWrite};
pub use write_around::WriteAround;
pub use write_back::WriteBack;
pub use write_through::WriteThrough;

use crate::cache::{CoherenceKind, DirtyState, EntryStore};
use crate::trace::TraceEvent;
use crate::types::{LogicalTime, Value};
use std::fmt;

/// What the cache side should do after the protocol has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheAction {
    /// Admit or update the entry with the given coherence state.
    Admit(DirtyState),
    /// Leave the cache alone; the write went straight to the backing store.
    Bypass,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOutcome {
    pub action: CacheAction,
    /// Events produced while resolving the write, in order.
    pub events: Vec<TraceEvent>,
}

pub trait CoherenceProtocol: fmt::Debug + Send + Sync {
    fn kind(&self) -> CoherenceKind;

    fn on_write(
        &self,
        key: &str,
        value: &Value,
        now: LogicalTime,
        store: &mut EntryStore,
        backing: &mut BackingStore,
    ) -> WriteOutcome;
}

/// Builds the protocol implementation for `kind`.
pub fn for_kind(kind: CoherenceKind) -> Box<dyn CoherenceProtocol> {
    match kind {
        CoherenceKind::WriteThrough => Box::new(WriteThrough),
        CoherenceKind::WriteBack => Box::new(WriteBack),
        CoherenceKind::WriteAround => Box::new(WriteAround),
    }
}
