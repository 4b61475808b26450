//! Simulation engine: applies operations one at a time, in submission order,
//! and records what happened as trace events.

use crate::cache::{
    Admission, CacheEntry, CoherenceKind, Configuration, DirtyState, EngineMetrics,
    EngineMetricsSnapshot, EntryStore, EvictionPolicyKind, Lookup,
};
use crate::clock::LogicalClock;
use crate::coherence::{self, BackingStore, BackingWrite, CacheAction, CoherenceProtocol, FlushCause};
use crate::errors::EngineError;
use crate::operation::Operation;
use crate::policy::{self, EvictionPolicy};
use crate::trace::{EvictionReason, TraceEvent};
use crate::types::{Key, LogicalTime, Ticks, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// A single logical cache instance. Not internally synchronized; wrap it in
/// [`SharedEngine`] to share across threads.
#[derive(Debug)]
pub struct Engine {
    config: Configuration,
    clock: LogicalClock,
    store: EntryStore,
    policy: Box<dyn EvictionPolicy>,
    protocol: Box<dyn CoherenceProtocol>,
    backing: BackingStore,
    trace: Vec<TraceEvent>,
    metrics: EngineMetrics,
}

impl Engine {
    /// Creates an engine.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `capacity` is zero.
    pub fn new(
        capacity: usize,
        eviction: EvictionPolicyKind,
        coherence: CoherenceKind,
        default_ttl: Option<Ticks>,
    ) -> Result<Self, EngineError> {
        Self::with_config(Configuration::new(capacity, eviction, coherence, default_ttl))
    }

    /// Creates an engine from a full configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn with_config(config: Configuration) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "engine created capacity={} eviction={} coherence={} default_ttl={:?} read_fill={}",
            config.capacity,
            config.eviction,
            config.coherence,
            config.default_ttl,
            config.read_fill
        );
        Ok(Self {
            store: EntryStore::new(config.capacity),
            policy: policy::for_kind(config.eviction),
            protocol: coherence::for_kind(config.coherence),
            clock: LogicalClock::new(),
            backing: BackingStore::new(),
            trace: Vec::new(),
            metrics: EngineMetrics::default(),
            config,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn now(&self) -> LogicalTime {
        self.clock.now()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Applies one operation and returns the events it produced, in order.
    ///
    /// # Errors
    /// Currently infallible for well-formed operations; the `Result` is part of the API contract.
    pub fn apply(&mut self, op: Operation) -> Result<Vec<TraceEvent>, EngineError> {
        let now = self.clock.tick();
        let events = match op {
            Operation::Get { key } => self.apply_get(key, now),
            Operation::Put { key, value, ttl } => self.apply_put(key, value, ttl, now),
        };
        self.record(&events);
        Ok(events)
    }

    /// Shorthand for `apply(Operation::get(key))`.
    pub fn get(&mut self, key: impl Into<Key>) -> Result<Vec<TraceEvent>, EngineError> {
        self.apply(Operation::get(key))
    }

    /// Shorthand for `apply(Operation::put(key, value))`.
    pub fn put(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<Vec<TraceEvent>, EngineError> {
        self.apply(Operation::put(key, value))
    }

    /// Moves the clock forward without applying an operation.
    pub fn advance(&mut self, ticks: Ticks) -> LogicalTime {
        self.clock.advance(ticks)
    }

    /// Drains every pending write-back value to the backing store. No-op under
    /// write-through and write-around.
    pub fn flush_dirty(&mut self) -> Vec<BackingWrite> {
        let now = self.clock.now();
        let writes = self.backing.drain_pending(now);
        let mut events = Vec::with_capacity(writes.len());
        for w in &writes {
            self.store.mark_clean(&w.key);
            events.push(TraceEvent::flushed(&w.key));
        }
        if !writes.is_empty() {
            crate::dev6!("flush_dirty at={} drained={}", now, writes.len());
        }
        self.metrics.flushes += writes.len() as u64;
        self.metrics.backing_writes += writes.len() as u64;
        self.record(&events);
        writes
    }

    /// Reaps every entry lapsed at the current time, oldest insertion first.
    pub fn purge_expired(&mut self) -> Vec<TraceEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        for key in self.store.expired_keys(now) {
            if let Some(entry) = self.store.remove(&key) {
                self.reap(&entry, now, &mut events);
            }
        }
        self.record(&events);
        events
    }

    /// Entries ordered by the active policy, most likely to be evicted last.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        let mut ordered = self.policy.eviction_order(self.store.entries());
        ordered.reverse();
        ordered.into_iter().cloned().collect()
    }

    /// The key the active policy would evict next, if any.
    pub fn next_victim(&self) -> Option<Key> {
        if self.store.is_empty() {
            return None;
        }
        Some(self.policy.select_victim(self.store.entries()))
    }

    /// Read-only view of one entry; not an access.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.store.peek(key)
    }

    /// Every event emitted so far, in order.
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    pub fn backing(&self) -> &BackingStore {
        &self.backing
    }

    pub fn metrics_snapshot(&self) -> EngineMetricsSnapshot {
        self.metrics.snapshot()
    }

    fn apply_get(&mut self, key: Key, now: LogicalTime) -> Vec<TraceEvent> {
        let mut events = Vec::with_capacity(2);
        let lapsed = match self.store.get(&key, now) {
            Lookup::Hit(_) => {
                self.metrics.hits += 1;
                events.push(TraceEvent::Hit { key });
                return events;
            }
            Lookup::Miss => None,
            Lookup::Expired(entry) => Some(entry),
        };
        if let Some(entry) = lapsed {
            self.reap(&entry, now, &mut events);
        }
        self.metrics.misses += 1;
        events.push(TraceEvent::miss(&key));

        if self.config.read_fill
            && let Some(value) = self.backing.durable_value(&key).cloned()
        {
            let expires_at = self.config.default_ttl.map(|t| now.plus(t));
            self.admit(key, value, now, expires_at, DirtyState::Clean, &mut events);
        }
        events
    }

    fn apply_put(
        &mut self,
        key: Key,
        value: Value,
        ttl: Option<Ticks>,
        now: LogicalTime,
    ) -> Vec<TraceEvent> {
        let outcome = self.protocol.on_write(&key, &value, now, &mut self.store, &mut self.backing);
        for ev in &outcome.events {
            match ev {
                TraceEvent::WriteThrough { .. } | TraceEvent::WriteAround { .. } => {
                    self.metrics.backing_writes += 1;
                }
                TraceEvent::Evicted { reason: EvictionReason::Invalidated, .. } => {
                    self.metrics.invalidations += 1;
                }
                _ => {}
            }
        }
        let mut events = outcome.events;
        if let CacheAction::Admit(state) = outcome.action {
            let expires_at = ttl.or(self.config.default_ttl).map(|t| now.plus(t));
            self.admit(key, value, now, expires_at, state, &mut events);
        }
        events
    }

    fn admit(
        &mut self,
        key: Key,
        value: Value,
        now: LogicalTime,
        expires_at: Option<LogicalTime>,
        state: DirtyState,
        events: &mut Vec<TraceEvent>,
    ) {
        if !self.store.contains(&key) && self.store.is_full() {
            self.evict_one(now, events);
        }
        let admitted = TraceEvent::admitted(&key);
        match self.store.put(key, value, now, expires_at, state) {
            Admission::Inserted => self.metrics.admissions += 1,
            Admission::Updated => self.metrics.updates += 1,
        }
        events.push(admitted);
    }

    fn evict_one(&mut self, now: LogicalTime, events: &mut Vec<TraceEvent>) {
        let victim = self.policy.select_victim(self.store.entries());
        crate::dev6!("evict policy={} victim={} at={}", self.policy.kind(), victim, now);
        if self.store.peek(&victim).is_some_and(CacheEntry::is_dirty)
            && self.backing.flush_key(&victim, now, FlushCause::Eviction).is_some()
        {
            self.metrics.flushes += 1;
            self.metrics.backing_writes += 1;
            events.push(TraceEvent::flushed(&victim));
        }
        self.store.remove(&victim);
        self.metrics.capacity_evictions += 1;
        events.push(TraceEvent::evicted(&victim, EvictionReason::Capacity));
    }

    /// Emits the events for an entry that lapsed, flushing it first if dirty.
    fn reap(&mut self, entry: &CacheEntry, now: LogicalTime, events: &mut Vec<TraceEvent>) {
        if entry.is_dirty() && self.backing.flush_key(&entry.key, now, FlushCause::Expiry).is_some() {
            crate::dev6!("flush on expiry key={} at={}", entry.key, now);
            self.metrics.flushes += 1;
            self.metrics.backing_writes += 1;
            events.push(TraceEvent::flushed(&entry.key));
        }
        self.metrics.expirations += 1;
        events.push(TraceEvent::expired(&entry.key));
    }

    fn record(&mut self, events: &[TraceEvent]) {
        for ev in events {
            log::debug!(target: "cachesim::trace", "{} {}", self.clock.now(), ev);
        }
        self.trace.extend_from_slice(events);
    }
}

/// Engine behind a mutex for hosts that call from several threads. Each call
/// holds the lock for the whole operation.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)) }
    }

    pub fn apply(&self, op: Operation) -> Result<Vec<TraceEvent>, EngineError> {
        self.inner.lock().apply(op)
    }

    pub fn flush_dirty(&self) -> Vec<BackingWrite> {
        self.inner.lock().flush_dirty()
    }

    pub fn snapshot(&self) -> Vec<CacheEntry> {
        self.inner.lock().snapshot()
    }

    pub fn metrics_snapshot(&self) -> EngineMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
