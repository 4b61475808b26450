use super::{EvictionPolicy, Rank};
use crate::cache::{CacheEntry, EvictionPolicyKind};

/// Least-recently-used: evicts the entry with the oldest `last_accessed_at`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl EvictionPolicy for LruPolicy {
    fn kind(&self) -> EvictionPolicyKind {
        EvictionPolicyKind::Lru
    }

    fn rank(&self, entry: &CacheEntry) -> Rank {
        (entry.last_accessed_at.get(), entry.seq, 0)
    }
}
