use crate::cache::Configuration;
use crate::export::TraceFormat;
use crate::workload::{WorkloadFormat, WorkloadSpec};
use std::path::PathBuf;

pub enum Command {
    /// Replay a workload and report the trace, metrics and optionally the final snapshot.
    Run {
        config: Configuration,
        workload: PathBuf,
        workload_format: Option<WorkloadFormat>,
        out: Option<PathBuf>,
        format: TraceFormat,
        snapshot: bool,
    },
    /// Replay a workload under every eviction policy with the same coherence protocol.
    Compare {
        config: Configuration,
        workload: PathBuf,
        workload_format: Option<WorkloadFormat>,
    },
    /// Write a synthetic NDJSON workload.
    Generate { spec: WorkloadSpec, out: PathBuf },
}
