use crate::cache::entry::{CacheEntry, DirtyState};
use crate::types::{Key, LogicalTime, Value};
use std::collections::HashMap;

/// Result of a lookup against the store.
#[derive(Debug)]
pub enum Lookup<'a> {
    Hit(&'a Value),
    Miss,
    /// The entry had lapsed and was reaped; the removed entry is handed back.
    Expired(CacheEntry),
}

/// Whether an admission created a new entry or updated an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Inserted,
    Updated,
}

/// Capacity-bounded map from key to entry. Owns all entry metadata; never picks
/// eviction victims on its own.
#[derive(Debug, Clone)]
pub struct EntryStore {
    capacity: usize,
    entries: HashMap<Key, CacheEntry>,
    next_seq: u64,
}

impl EntryStore {
    /// Creates an empty store. `capacity` must be non-zero; the engine validates it.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "EntryStore capacity must be non-zero");
        Self { capacity, entries: HashMap::with_capacity(capacity), next_seq: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Read-only view of an entry; does not count as an access.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> &HashMap<Key, CacheEntry> {
        &self.entries
    }

    /// Looks up `key` at time `now`. A hit refreshes recency and frequency;
    /// a lapsed entry is removed and returned as `Expired`.
    pub fn get(&mut self, key: &str, now: LogicalTime) -> Lookup<'_> {
        let expired = match self.entries.get(key) {
            None => return Lookup::Miss,
            Some(entry) => entry.is_expired(now),
        };
        if expired {
            return match self.entries.remove(key) {
                Some(entry) => Lookup::Expired(entry),
                None => Lookup::Miss,
            };
        }
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch(now);
                Lookup::Hit(&entry.value)
            }
            None => Lookup::Miss,
        }
    }

    /// Inserts or updates `key`. An update keeps the original insertion time and counts as an access.
    ///
    /// # Panics
    /// Panics if `key` is new and the store is already full: the caller must evict first.
    pub fn put(
        &mut self,
        key: Key,
        value: Value,
        now: LogicalTime,
        expires_at: Option<LogicalTime>,
        state: DirtyState,
    ) -> Admission {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.expires_at = expires_at;
            entry.state = state;
            entry.touch(now);
            return Admission::Updated;
        }
        assert!(
            self.entries.len() < self.capacity,
            "admitting '{key}' would exceed capacity {}; evict first",
            self.capacity
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = CacheEntry::new(key.clone(), value, now, seq, expires_at, state);
        self.entries.insert(key, entry);
        Admission::Inserted
    }

    /// Unconditional deletion.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    /// Marks an entry clean after its value reached the backing store.
    pub fn mark_clean(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.state = DirtyState::Clean;
                true
            }
            None => false,
        }
    }

    /// Keys of entries lapsed at `now`, oldest insertion first.
    pub fn expired_keys(&self, now: LogicalTime) -> Vec<Key> {
        let mut lapsed: Vec<&CacheEntry> =
            self.entries.values().filter(|e| e.is_expired(now)).collect();
        lapsed.sort_by_key(|e| e.seq);
        lapsed.into_iter().map(|e| e.key.clone()).collect()
    }
}
