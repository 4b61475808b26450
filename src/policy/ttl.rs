use super::{EvictionPolicy, Rank};
use crate::cache::{CacheEntry, EvictionPolicyKind};

/// Soonest-to-expire first. Entries without a TTL rank after every bounded
/// entry, even one whose expiry saturated at the end of time, so they only go
/// once no entry has a TTL, and then in insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TtlPolicy;

impl EvictionPolicy for TtlPolicy {
    fn kind(&self) -> EvictionPolicyKind {
        EvictionPolicyKind::Ttl
    }

    fn rank(&self, entry: &CacheEntry) -> Rank {
        match entry.expires_at {
            Some(at) => (0, at.get(), entry.seq),
            None => (1, 0, entry.seq),
        }
    }
}
