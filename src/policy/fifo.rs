use super::{EvictionPolicy, Rank};
use crate::cache::{CacheEntry, EvictionPolicyKind};

/// First-in-first-out on insertion time; access history is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl EvictionPolicy for FifoPolicy {
    fn kind(&self) -> EvictionPolicyKind {
        EvictionPolicyKind::Fifo
    }

    fn rank(&self, entry: &CacheEntry) -> Rank {
        (entry.inserted_at.get(), entry.seq, 0)
    }
}
