use cachesim::{CoherenceKind, Engine, EvictionPolicyKind, Operation, SharedEngine, TraceEvent};
use std::thread;

#[test]
fn concurrent_callers_are_serialized() {
    let engine = Engine::new(8, EvictionPolicyKind::Lru, CoherenceKind::WriteBack, None).unwrap();
    let shared = SharedEngine::new(engine);
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    let key = format!("t{t}-k{}", i % 5);
                    shared.apply(Operation::put(key.clone(), format!("{i}"))).unwrap();
                    shared.apply(Operation::get(key)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let m = shared.metrics_snapshot();
    assert_eq!(m.admissions + m.updates, 200);
    assert_eq!(m.hits + m.misses, 200);
    shared.with(|e| {
        assert!(e.len() <= e.capacity());
        assert_eq!(e.now().get(), 400);
        let admitted = e.trace().iter().filter(|ev| matches!(ev, TraceEvent::Admitted { .. })).count();
        assert_eq!(admitted, 200);
    });

    shared.flush_dirty();
    for entry in shared.snapshot() {
        assert!(!entry.is_dirty());
    }
}
