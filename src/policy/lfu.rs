use super::{EvictionPolicy, Rank};
use crate::cache::{CacheEntry, EvictionPolicyKind};

/// Least-frequently-used. Equal counts fall back to recency, then insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfuPolicy;

impl EvictionPolicy for LfuPolicy {
    fn kind(&self) -> EvictionPolicyKind {
        EvictionPolicyKind::Lfu
    }

    fn rank(&self, entry: &CacheEntry) -> Rank {
        (entry.access_count, entry.last_accessed_at.get(), entry.seq)
    }
}
