//! Format detection heuristics for workload files.

use std::io::{self, BufRead};
use std::path::Path;

use super::WorkloadFormat;

pub fn detect_format<R: BufRead>(reader: &mut R, path: &Path) -> io::Result<WorkloadFormat> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        match ext.to_lowercase().as_str() {
            "jsonl" | "ndjson" | "json" => return Ok(WorkloadFormat::Ndjson),
            "csv" => return Ok(WorkloadFormat::Csv),
            _ => {}
        }
    }
    let buf = reader.fill_buf()?; // peek without consuming
    let s = String::from_utf8_lossy(&buf[..buf.len().min(256)]);
    if s.trim_start().starts_with('{') {
        return Ok(WorkloadFormat::Ndjson);
    }
    Ok(WorkloadFormat::Csv)
}
