use cachesim::cache::DirtyState;
use cachesim::coherence::{BackingWriteKind, FlushCause};
use cachesim::{CoherenceKind, Configuration, Engine, EvictionPolicyKind, EvictionReason, Operation, TraceEvent};

fn engine(capacity: usize, coherence: CoherenceKind) -> Engine {
    Engine::new(capacity, EvictionPolicyKind::Lru, coherence, None).unwrap()
}

#[test]
fn write_through_reaches_backing_store_immediately() {
    let mut e = engine(2, CoherenceKind::WriteThrough);
    e.put("k", "v1").unwrap();
    assert_eq!(e.backing().durable_value("k").map(String::as_str), Some("v1"));
    assert_eq!(e.backing().writes()[0].kind, BackingWriteKind::WriteThrough);
    assert!(e.backing().pending().is_empty());
    assert!(e.flush_dirty().is_empty());
}

#[test]
fn write_back_defers_until_flush() {
    let mut e = engine(4, CoherenceKind::WriteBack);
    let ev = e.put("A", "a1").unwrap();
    assert_eq!(ev, vec![TraceEvent::WriteBackScheduled { key: "A".into() }, TraceEvent::admitted("A")]);
    e.put("B", "b1").unwrap();
    e.put("A", "a2").unwrap();
    assert!(e.backing().durable_value("A").is_none());
    assert_eq!(e.peek("A").unwrap().state, DirtyState::Dirty);
    assert_eq!(e.get("A").unwrap(), vec![TraceEvent::hit("A")]);

    let writes = e.flush_dirty();
    let keys: Vec<&str> = writes.iter().map(|w| w.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert_eq!(writes[0].value, "a2");
    assert!(writes.iter().all(|w| w.kind == BackingWriteKind::Flush(FlushCause::Explicit)));
    assert_eq!(e.backing().durable_value("A").map(String::as_str), Some("a2"));
    assert_eq!(e.peek("A").unwrap().state, DirtyState::Clean);
    assert_eq!(e.trace().last(), Some(&TraceEvent::flushed("B")));
    assert!(e.flush_dirty().is_empty());
}

#[test]
fn write_back_flushes_dirty_victim_before_eviction() {
    let mut e = engine(2, CoherenceKind::WriteBack);
    e.put("A", "a").unwrap();
    e.put("B", "b").unwrap();
    let ev = e.put("C", "c").unwrap();
    assert_eq!(
        ev,
        vec![
            TraceEvent::WriteBackScheduled { key: "C".into() },
            TraceEvent::flushed("A"),
            TraceEvent::evicted("A", EvictionReason::Capacity),
            TraceEvent::admitted("C"),
        ]
    );
    assert_eq!(e.backing().durable_value("A").map(String::as_str), Some("a"));
    let last = e.backing().writes().last().unwrap();
    assert_eq!(last.kind, BackingWriteKind::Flush(FlushCause::Eviction));
    assert!(!e.backing().has_pending("A"));
}

#[test]
fn write_back_clean_victim_is_not_reflushed() {
    let mut e = engine(2, CoherenceKind::WriteBack);
    e.put("A", "a").unwrap();
    e.put("B", "b").unwrap();
    e.flush_dirty();
    let ev = e.put("C", "c").unwrap();
    assert!(!ev.contains(&TraceEvent::flushed("A")));
    assert_eq!(e.metrics_snapshot().flushes, 2);
}

#[test]
fn write_around_bypasses_the_cache() {
    let mut e = engine(2, CoherenceKind::WriteAround);
    let ev = e.put("K", "v").unwrap();
    assert_eq!(ev, vec![TraceEvent::WriteAround { key: "K".into() }]);
    assert_eq!(e.get("K").unwrap(), vec![TraceEvent::miss("K")]);
    assert!(e.is_empty());
    assert_eq!(e.backing().durable_value("K").map(String::as_str), Some("v"));
}

#[test]
fn write_around_invalidates_cached_copy() {
    let cfg = Configuration::new(2, EvictionPolicyKind::Lru, CoherenceKind::WriteAround, None)
        .with_read_fill(true);
    let mut e = Engine::with_config(cfg).unwrap();
    e.put("K", "v1").unwrap();
    assert_eq!(e.get("K").unwrap(), vec![TraceEvent::miss("K"), TraceEvent::admitted("K")]);
    assert_eq!(e.get("K").unwrap(), vec![TraceEvent::hit("K")]);

    let ev = e.put("K", "v2").unwrap();
    assert_eq!(
        ev,
        vec![
            TraceEvent::WriteAround { key: "K".into() },
            TraceEvent::evicted("K", EvictionReason::Invalidated),
        ]
    );
    assert!(e.peek("K").is_none());
    e.get("K").unwrap();
    assert_eq!(e.peek("K").unwrap().value, "v2");
    assert_eq!(e.metrics_snapshot().invalidations, 1);
}

#[test]
fn read_fill_evicts_when_full() {
    let cfg = Configuration::new(1, EvictionPolicyKind::Lru, CoherenceKind::WriteAround, None)
        .with_read_fill(true);
    let mut e = Engine::with_config(cfg).unwrap();
    e.put("A", "a").unwrap();
    e.put("B", "b").unwrap();
    e.get("A").unwrap();
    let ev = e.get("B").unwrap();
    assert_eq!(
        ev,
        vec![
            TraceEvent::miss("B"),
            TraceEvent::evicted("A", EvictionReason::Capacity),
            TraceEvent::admitted("B"),
        ]
    );
}

#[test]
fn read_fill_ignores_unknown_keys() {
    let cfg = Configuration::new(2, EvictionPolicyKind::Lru, CoherenceKind::WriteThrough, None)
        .with_read_fill(true);
    let mut e = Engine::with_config(cfg).unwrap();
    assert_eq!(e.get("nope").unwrap(), vec![TraceEvent::miss("nope")]);
    assert!(e.is_empty());
}

#[test]
fn write_back_dirty_entry_flushes_on_expiry() {
    let mut e = engine(4, CoherenceKind::WriteBack);
    e.apply(Operation::put_with_ttl("A", "a", 1)).unwrap();
    let ev = e.get("A").unwrap();
    assert_eq!(ev, vec![TraceEvent::flushed("A"), TraceEvent::expired("A"), TraceEvent::miss("A")]);
    assert_eq!(e.backing().durable_value("A").map(String::as_str), Some("a"));
    assert_eq!(
        e.backing().writes().last().unwrap().kind,
        BackingWriteKind::Flush(FlushCause::Expiry)
    );
}
