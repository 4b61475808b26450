//! Operation streams: loading, running and generating workloads.

mod delimited;
mod detect;
mod generate;
mod ndjson;

pub use delimited::read_csv;
pub use detect::detect_format;
pub use generate::{WorkloadSpec, generate};
pub use ndjson::{read_ndjson, write_ndjson};

use crate::engine::Engine;
use crate::errors::EngineError;
use crate::operation::Operation;
use crate::trace::TraceEvent;
use crate::types::{Key, Ticks, Value};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadFormat {
    Ndjson,
    Csv,
}

/// One step of a workload: an operation, or a control action between operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkloadStep {
    Op(Operation),
    /// Idle time; lets TTLs lapse without touching the cache.
    Advance(Ticks),
    Flush,
    Purge,
}

/// Flat on-disk record. NDJSON deserializes it directly and accepts a bare JSON
/// scalar as `value`; the CSV reader builds it from verbatim cells.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkloadRecord {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ticks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v: Option<serde_json::Value> = Option::deserialize(d)?;
    Ok(v.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }))
}

impl WorkloadRecord {
    /// Converts to a step; `line` is used for error reporting only.
    pub fn into_step(self, line: usize) -> Result<WorkloadStep, EngineError> {
        let missing = |field: &str| EngineError::Workload {
            line,
            message: format!("'{}' requires field '{field}'", self.kind),
        };
        match self.kind.trim().to_ascii_lowercase().as_str() {
            "get" => {
                let key = self.key.clone().ok_or_else(|| missing("key"))?;
                Ok(WorkloadStep::Op(Operation::Get { key }))
            }
            "put" => {
                let key = self.key.clone().ok_or_else(|| missing("key"))?;
                let value = self.value.clone().ok_or_else(|| missing("value"))?;
                Ok(WorkloadStep::Op(Operation::Put { key, value, ttl: self.ttl }))
            }
            "advance" => {
                let ticks = self.ticks.or(self.ttl).ok_or_else(|| missing("ticks"))?;
                Ok(WorkloadStep::Advance(ticks))
            }
            "flush" => Ok(WorkloadStep::Flush),
            "purge" => Ok(WorkloadStep::Purge),
            other => Err(EngineError::Workload { line, message: format!("unknown kind '{other}'") }),
        }
    }

    pub fn from_step(step: &WorkloadStep) -> Self {
        match step {
            WorkloadStep::Op(Operation::Get { key }) => {
                WorkloadRecord { kind: "get".into(), key: Some(key.clone()), ..Default::default() }
            }
            WorkloadStep::Op(Operation::Put { key, value, ttl }) => WorkloadRecord {
                kind: "put".into(),
                key: Some(key.clone()),
                value: Some(value.clone()),
                ttl: *ttl,
                ticks: None,
            },
            WorkloadStep::Advance(t) => {
                WorkloadRecord { kind: "advance".into(), ticks: Some(*t), ..Default::default() }
            }
            WorkloadStep::Flush => WorkloadRecord { kind: "flush".into(), ..Default::default() },
            WorkloadStep::Purge => WorkloadRecord { kind: "purge".into(), ..Default::default() },
        }
    }
}

/// Loads a workload file, detecting the format when `format` is `None`.
pub fn load_workload<P: AsRef<Path>>(
    path: P,
    format: Option<WorkloadFormat>,
) -> Result<Vec<WorkloadStep>, EngineError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| EngineError::Io(format!("failed to open workload {}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);
    let fmt = match format {
        Some(f) => f,
        None => detect_format(&mut reader, path)?,
    };
    let steps = match fmt {
        WorkloadFormat::Ndjson => read_ndjson(reader)?,
        WorkloadFormat::Csv => read_csv(reader)?,
    };
    log::info!("loaded workload {} steps={} format={:?}", path.display(), steps.len(), fmt);
    Ok(steps)
}

/// Applies `steps` in order and returns every event produced.
pub fn run_workload(engine: &mut Engine, steps: &[WorkloadStep]) -> Result<Vec<TraceEvent>, EngineError> {
    let mut events = Vec::with_capacity(steps.len());
    for step in steps {
        match step {
            WorkloadStep::Op(op) => events.extend(engine.apply(op.clone())?),
            WorkloadStep::Advance(t) => {
                engine.advance(*t);
            }
            WorkloadStep::Flush => {
                events.extend(engine.flush_dirty().iter().map(|w| TraceEvent::flushed(&w.key)));
            }
            WorkloadStep::Purge => events.extend(engine.purge_expired()),
        }
    }
    Ok(events)
}
