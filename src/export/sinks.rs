use crate::errors::EngineError;
use crate::trace::TraceEvent;
use serde::Serialize;
use std::io::Write;

pub trait TraceSink {
    fn write_event(&mut self, seq: usize, event: &TraceEvent) -> Result<(), EngineError>;
    fn finish(&mut self) -> Result<(), EngineError>;
}

pub struct NdjsonSink<W: Write> {
    w: W,
}

impl<W: Write> NdjsonSink<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }
}

impl<W: Write> TraceSink for NdjsonSink<W> {
    fn write_event(&mut self, _seq: usize, event: &TraceEvent) -> Result<(), EngineError> {
        serde_json::to_writer(&mut self.w, event)?;
        self.w.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), EngineError> {
        self.w.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    seq: usize,
    event: &'static str,
    key: &'a str,
    reason: &'static str,
}

pub struct CsvSink<W: Write> {
    w: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(w: W) -> Self {
        Self { w: csv::Writer::from_writer(w) }
    }
}

impl<W: Write> TraceSink for CsvSink<W> {
    fn write_event(&mut self, seq: usize, event: &TraceEvent) -> Result<(), EngineError> {
        self.w.serialize(CsvRow {
            seq,
            event: event.name(),
            key: event.key(),
            reason: event.reason().map_or("", |r| r.as_str()),
        })?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), EngineError> {
        self.w.flush()?;
        Ok(())
    }
}
