use super::{WorkloadRecord, WorkloadStep};
use crate::errors::EngineError;
use std::io::{BufRead, BufReader, Read, Write};

/// Reads one JSON object per line. Blank lines are skipped.
pub fn read_ndjson<R: Read>(reader: R) -> Result<Vec<WorkloadStep>, EngineError> {
    let reader = BufReader::new(reader);
    let mut steps = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: WorkloadRecord = serde_json::from_str(line)
            .map_err(|e| EngineError::Workload { line: line_no, message: e.to_string() })?;
        steps.push(record.into_step(line_no)?);
    }
    Ok(steps)
}

pub fn write_ndjson<W: Write>(steps: &[WorkloadStep], mut writer: W) -> Result<(), EngineError> {
    for step in steps {
        serde_json::to_writer(&mut writer, &WorkloadRecord::from_step(step))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
