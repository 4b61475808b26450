use cachesim::export::{TraceFormat, export_trace, export_trace_file};
use cachesim::{CoherenceKind, Engine, EvictionPolicyKind, EvictionReason, TraceEvent};
use std::str::FromStr;

fn sample_trace() -> Vec<TraceEvent> {
    let mut e = Engine::new(1, EvictionPolicyKind::Lru, CoherenceKind::WriteBack, None).unwrap();
    e.put("a", "1").unwrap();
    e.put("b", "2").unwrap();
    e.get("b").unwrap();
    e.trace().to_vec()
}

#[test]
fn ndjson_uses_event_tag() {
    let events = sample_trace();
    let mut buf = Vec::new();
    let n = export_trace(&events, TraceFormat::Ndjson, &mut buf).unwrap();
    assert_eq!(n, events.len());
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), events.len());
    assert_eq!(lines[0], r#"{"event":"write_back_scheduled","key":"a"}"#);
    assert!(lines.contains(&r#"{"event":"evicted","key":"a","reason":"capacity"}"#));
    assert_eq!(lines.last().copied(), Some(r#"{"event":"hit","key":"b"}"#));

    let parsed: Vec<TraceEvent> =
        lines.iter().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(parsed, events);
}

#[test]
fn csv_has_sequence_and_reason_columns() {
    let events = vec![
        TraceEvent::miss("x"),
        TraceEvent::evicted("y", EvictionReason::Invalidated),
    ];
    let mut buf = Vec::new();
    export_trace(&events, TraceFormat::Csv, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text, "seq,event,key,reason\n0,miss,x,\n1,evicted,y,invalidated\n");
}

#[test]
fn export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.ndjson");
    let events = sample_trace();
    let n = export_trace_file(&events, TraceFormat::Ndjson, &path).unwrap();
    assert_eq!(n, events.len());
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), events.len());
}

#[test]
fn format_names() {
    assert_eq!(TraceFormat::from_str("CSV").unwrap(), TraceFormat::Csv);
    assert_eq!(TraceFormat::from_str("jsonl").unwrap(), TraceFormat::Ndjson);
    assert!(TraceFormat::from_str("xml").is_err());
    assert_eq!(TraceFormat::default(), TraceFormat::Ndjson);
}

#[test]
fn display_is_compact() {
    assert_eq!(TraceEvent::hit("k").to_string(), "hit(k)");
    assert_eq!(
        TraceEvent::evicted("k", EvictionReason::Capacity).to_string(),
        "evicted(k, capacity)"
    );
}
