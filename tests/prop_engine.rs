use cachesim::{CoherenceKind, Engine, EvictionPolicyKind, Operation};
use proptest::prelude::*;
use std::collections::HashMap;

fn op_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0u8..6).prop_map(|k| Operation::get(format!("k{k}"))),
        (0u8..6, any::<u16>(), proptest::option::of(0u64..4)).prop_map(|(k, v, ttl)| {
            Operation::Put { key: format!("k{k}"), value: v.to_string(), ttl }
        }),
    ]
}

fn eviction_strategy() -> impl Strategy<Value = EvictionPolicyKind> {
    proptest::sample::select(EvictionPolicyKind::ALL.to_vec())
}

fn coherence_strategy() -> impl Strategy<Value = CoherenceKind> {
    prop_oneof![
        Just(CoherenceKind::WriteThrough),
        Just(CoherenceKind::WriteBack),
        Just(CoherenceKind::WriteAround),
    ]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_never_exceeds_capacity(
        capacity in 1usize..5,
        eviction in eviction_strategy(),
        coherence in coherence_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..80),
    ) {
        let mut engine = Engine::new(capacity, eviction, coherence, None).unwrap();
        for op in ops {
            engine.apply(op).unwrap();
            prop_assert!(engine.len() <= capacity);
            // dirty iff a write-back value is still pending
            for entry in engine.snapshot() {
                prop_assert_eq!(entry.is_dirty(), engine.backing().has_pending(&entry.key));
            }
        }
    }

    #[test]
    fn prop_replay_is_deterministic(
        eviction in eviction_strategy(),
        coherence in coherence_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..60),
    ) {
        let run = || {
            let mut e = Engine::new(3, eviction, coherence, Some(5)).unwrap();
            for op in &ops {
                e.apply(op.clone()).unwrap();
            }
            (e.trace().to_vec(), e.snapshot())
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_last_write_becomes_durable(
        eviction in eviction_strategy(),
        coherence in coherence_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..80),
    ) {
        let mut engine = Engine::new(2, eviction, coherence, None).unwrap();
        let mut last: HashMap<String, String> = HashMap::new();
        for op in ops {
            if let Operation::Put { key, value, .. } = &op {
                last.insert(key.clone(), value.clone());
            }
            engine.apply(op).unwrap();
        }
        engine.flush_dirty();
        prop_assert!(engine.backing().pending().is_empty());
        for (key, value) in &last {
            prop_assert_eq!(engine.backing().durable_value(key), Some(value));
        }
    }

    #[test]
    fn prop_snapshot_ends_with_next_victim(
        eviction in eviction_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let mut engine = Engine::new(4, eviction, CoherenceKind::WriteThrough, None).unwrap();
        for op in ops {
            engine.apply(op).unwrap();
        }
        let snap = engine.snapshot();
        prop_assert_eq!(snap.last().map(|e| e.key.clone()), engine.next_victim());
    }
}
