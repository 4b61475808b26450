//! Trace export to NDJSON or CSV.

mod sinks;

pub use sinks::{CsvSink, NdjsonSink, TraceSink};

use crate::errors::EngineError;
use crate::trace::TraceEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceFormat {
    #[default]
    Ndjson,
    Csv,
}

impl FromStr for TraceFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ndjson" | "jsonl" | "json" => Ok(TraceFormat::Ndjson),
            "csv" => Ok(TraceFormat::Csv),
            other => Err(EngineError::UnknownKind(format!("trace format '{other}'"))),
        }
    }
}

/// Writes `events` to `writer` in `format`. Returns the number of events written.
pub fn export_trace<W: Write>(
    events: &[TraceEvent],
    format: TraceFormat,
    writer: W,
) -> Result<usize, EngineError> {
    match format {
        TraceFormat::Ndjson => drain_into(NdjsonSink::new(writer), events),
        TraceFormat::Csv => drain_into(CsvSink::new(writer), events),
    }
}

fn drain_into<S: TraceSink>(mut sink: S, events: &[TraceEvent]) -> Result<usize, EngineError> {
    for (seq, ev) in events.iter().enumerate() {
        sink.write_event(seq, ev)?;
    }
    sink.finish()?;
    Ok(events.len())
}

pub fn export_trace_file<P: AsRef<Path>>(
    events: &[TraceEvent],
    format: TraceFormat,
    path: P,
) -> Result<usize, EngineError> {
    let file = File::create(path.as_ref())?;
    let n = export_trace(events, format, BufWriter::new(file))?;
    log::info!("exported {} trace events to {}", n, path.as_ref().display());
    Ok(n)
}
