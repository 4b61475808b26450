use super::{WorkloadRecord, WorkloadStep};
use crate::errors::EngineError;
use crate::types::{Key, Ticks, Value};
use serde::Deserialize;
use std::io::Read;

/// One CSV row. Cells stay verbatim text: `value` is never type-inferred, so
/// `007` or `1.50` reach the cache unchanged.
#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    #[serde(default)]
    key: Option<Key>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    ttl: Option<Ticks>,
    #[serde(default)]
    ticks: Option<Ticks>,
}

impl From<CsvRow> for WorkloadRecord {
    fn from(row: CsvRow) -> Self {
        WorkloadRecord { kind: row.kind, key: row.key, value: row.value, ttl: row.ttl, ticks: row.ticks }
    }
}

/// Reads a CSV workload with header `kind,key,value,ttl`. For `advance` rows the
/// tick count goes in `ttl` (or an optional `ticks` column).
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<WorkloadStep>, EngineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut steps = Vec::new();
    for (idx, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line_no = idx + 2;
        let row = result.map_err(|e| EngineError::Workload { line: line_no, message: e.to_string() })?;
        steps.push(WorkloadRecord::from(row).into_step(line_no)?);
    }
    Ok(steps)
}
