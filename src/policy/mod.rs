//! Eviction policies.
//!
//! Each policy maps an entry to a [`Rank`]; the victim is the entry with the
//! smallest rank. Every rank breaks ties on the entry's admission `seq`, a store
//! counter independent of the clock, so selection stays total even after
//! logical time saturates. Ties fall to the oldest insertion.

mod fifo;
mod lfu;
mod lru;
mod ttl;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use ttl::TtlPolicy;

use crate::cache::{CacheEntry, EvictionPolicyKind};
use crate::types::Key;
use std::collections::HashMap;
use std::fmt;

/// Eviction priority; compared lexicographically, smallest goes first.
pub type Rank = (u64, u64, u64);

pub trait EvictionPolicy: fmt::Debug + Send + Sync {
    fn kind(&self) -> EvictionPolicyKind;

    fn rank(&self, entry: &CacheEntry) -> Rank;

    /// Picks the key to evict.
    ///
    /// # Panics
    /// Calling this on an empty entry set is a precondition violation and panics.
    fn select_victim(&self, entries: &HashMap<Key, CacheEntry>) -> Key {
        match entries.values().min_by_key(|e| self.rank(e)) {
            Some(victim) => victim.key.clone(),
            None => panic!("select_victim called on an empty entry store ({})", self.kind()),
        }
    }

    /// Entries in eviction order, next victim first.
    fn eviction_order<'a>(&self, entries: &'a HashMap<Key, CacheEntry>) -> Vec<&'a CacheEntry> {
        let mut ordered: Vec<&CacheEntry> = entries.values().collect();
        ordered.sort_by_key(|e| self.rank(e));
        ordered
    }
}

/// Builds the policy implementation for `kind`.
pub fn for_kind(kind: EvictionPolicyKind) -> Box<dyn EvictionPolicy> {
    match kind {
        EvictionPolicyKind::Lru => Box::new(LruPolicy),
        EvictionPolicyKind::Lfu => Box::new(LfuPolicy),
        EvictionPolicyKind::Fifo => Box::new(FifoPolicy),
        EvictionPolicyKind::Ttl => Box::new(TtlPolicy),
    }
}
