use cachesim::workload::{
    WorkloadFormat, WorkloadSpec, WorkloadStep, generate, load_workload, read_csv, read_ndjson,
    run_workload, write_ndjson,
};
use cachesim::{CoherenceKind, Engine, EngineError, EvictionPolicyKind, Operation, TraceEvent};
use std::io::{Cursor, Write};

#[test]
fn ndjson_parses_every_kind() {
    let src = r#"{"kind":"put","key":"a","value":"1"}
{"kind":"put","key":"b","value":2,"ttl":5}

{"kind":"get","key":"a"}
{"kind":"advance","ticks":3}
{"kind":"flush"}
{"kind":"purge"}
"#;
    let steps = read_ndjson(Cursor::new(src)).unwrap();
    assert_eq!(
        steps,
        vec![
            WorkloadStep::Op(Operation::put("a", "1")),
            WorkloadStep::Op(Operation::put_with_ttl("b", "2", 5)),
            WorkloadStep::Op(Operation::get("a")),
            WorkloadStep::Advance(3),
            WorkloadStep::Flush,
            WorkloadStep::Purge,
        ]
    );
}

#[test]
fn ndjson_error_reports_line() {
    let src = "{\"kind\":\"get\",\"key\":\"a\"}\n{\"kind\":\"put\",\"key\":\"b\"}\n";
    match read_ndjson(Cursor::new(src)) {
        Err(EngineError::Workload { line, message }) => {
            assert_eq!(line, 2);
            assert!(message.contains("value"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    let bad = "{\"kind\":\"get\",\"key\":\"a\"}\nnot json\n";
    assert!(matches!(read_ndjson(Cursor::new(bad)), Err(EngineError::Workload { line: 2, .. })));
}

#[test]
fn unknown_kind_is_rejected() {
    let src = "{\"kind\":\"delete\",\"key\":\"a\"}\n";
    assert!(matches!(read_ndjson(Cursor::new(src)), Err(EngineError::Workload { line: 1, .. })));
}

#[test]
fn csv_parses_with_header() {
    let src = "kind,key,value,ttl\nput,a,1,\nput,b,2,4\nget,a,,\nadvance,,,7\nflush,,,\n";
    let steps = read_csv(Cursor::new(src)).unwrap();
    assert_eq!(
        steps,
        vec![
            WorkloadStep::Op(Operation::put("a", "1")),
            WorkloadStep::Op(Operation::put_with_ttl("b", "2", 4)),
            WorkloadStep::Op(Operation::get("a")),
            WorkloadStep::Advance(7),
            WorkloadStep::Flush,
        ]
    );
}

#[test]
fn csv_error_line_counts_header() {
    let src = "kind,key,value,ttl\nget,a,,\nget,,,\n";
    assert!(matches!(read_csv(Cursor::new(src)), Err(EngineError::Workload { line: 3, .. })));
}

#[test]
fn load_detects_format_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("w.csv");
    std::fs::write(&csv_path, "kind,key,value,ttl\nput,a,1,\nget,a,,\n").unwrap();
    let steps = load_workload(&csv_path, None).unwrap();
    assert_eq!(steps.len(), 2);

    let sniffed = dir.path().join("workload");
    let mut f = std::fs::File::create(&sniffed).unwrap();
    writeln!(f, "{{\"kind\":\"get\",\"key\":\"x\"}}").unwrap();
    drop(f);
    let steps = load_workload(&sniffed, None).unwrap();
    assert_eq!(steps, vec![WorkloadStep::Op(Operation::get("x"))]);

    let forced = load_workload(&csv_path, Some(WorkloadFormat::Csv)).unwrap();
    assert_eq!(forced.len(), 2);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_workload(dir.path().join("absent.ndjson"), None).unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

#[test]
fn run_workload_drives_engine() {
    let steps = vec![
        WorkloadStep::Op(Operation::put_with_ttl("a", "1", 2)),
        WorkloadStep::Op(Operation::put("b", "2")),
        WorkloadStep::Advance(5),
        WorkloadStep::Purge,
        WorkloadStep::Flush,
        WorkloadStep::Op(Operation::get("b")),
    ];
    let mut engine = Engine::new(4, EvictionPolicyKind::Lru, CoherenceKind::WriteBack, None).unwrap();
    let events = run_workload(&mut engine, &steps).unwrap();
    assert_eq!(
        events,
        vec![
            TraceEvent::WriteBackScheduled { key: "a".into() },
            TraceEvent::admitted("a"),
            TraceEvent::WriteBackScheduled { key: "b".into() },
            TraceEvent::admitted("b"),
            TraceEvent::flushed("a"),
            TraceEvent::expired("a"),
            TraceEvent::flushed("b"),
            TraceEvent::hit("b"),
        ]
    );
    assert_eq!(events.as_slice(), engine.trace());
}

#[test]
fn generated_workload_survives_ndjson() {
    let spec = WorkloadSpec { ops: 40, keys: 5, read_ratio: 0.5, ttl: Some(9), seed: 11 };
    let steps = generate(&spec);
    assert_eq!(steps.len(), 40);
    let mut buf = Vec::new();
    write_ndjson(&steps, &mut buf).unwrap();
    let back = read_ndjson(Cursor::new(buf)).unwrap();
    assert_eq!(back, steps);
}

#[test]
fn replay_is_deterministic() {
    let steps = generate(&WorkloadSpec { ops: 500, keys: 24, ..Default::default() });
    for eviction in EvictionPolicyKind::ALL {
        let run = || {
            let mut e = Engine::new(6, eviction, CoherenceKind::WriteBack, Some(20)).unwrap();
            run_workload(&mut e, &steps).unwrap()
        };
        assert_eq!(run(), run(), "{eviction} diverged");
    }
}

#[test]
fn csv_values_reach_backing_store_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("numeric.csv");
    std::fs::write(&path, "kind,key,value,ttl\nput,a,007,\nput,b,1.50,\nput,c,1e3,\n").unwrap();
    let steps = load_workload(&path, None).unwrap();
    let mut engine = Engine::new(4, EvictionPolicyKind::Lru, CoherenceKind::WriteThrough, None).unwrap();
    run_workload(&mut engine, &steps).unwrap();
    for (key, value) in [("a", "007"), ("b", "1.50"), ("c", "1e3")] {
        assert_eq!(engine.peek(key).unwrap().value, value);
        assert_eq!(engine.backing().durable_value(key).map(String::as_str), Some(value));
    }

    let mut buf = Vec::new();
    write_ndjson(&steps, &mut buf).unwrap();
    assert_eq!(read_ndjson(Cursor::new(buf)).unwrap(), steps);
}
