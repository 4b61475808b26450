use crate::cache::{CacheEntry, Configuration, EngineMetricsSnapshot, EvictionPolicyKind};
use crate::engine::Engine;
use crate::errors::EngineError;
use crate::export::{export_trace, export_trace_file};
use crate::workload::{self, WorkloadStep};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

use super::command::Command;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

/// Hit ratio of one policy over a workload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub eviction: EvictionPolicyKind,
    pub metrics: EngineMetricsSnapshot,
    pub hit_ratio: f64,
}

/// Runs `steps` once per eviction policy, keeping the rest of `base` fixed.
pub fn compare_policies(
    base: &Configuration,
    steps: &[WorkloadStep],
) -> Result<Vec<ComparisonRow>, EngineError> {
    EvictionPolicyKind::ALL
        .iter()
        .map(|&eviction| {
            let mut engine = Engine::with_config(Configuration { eviction, ..base.clone() })?;
            workload::run_workload(&mut engine, steps)?;
            let metrics = engine.metrics_snapshot();
            Ok(ComparisonRow { eviction, metrics, hit_ratio: metrics.hit_ratio() })
        })
        .collect()
}

pub fn run(cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    run_with_format(cmd, OutputMode::Human, &mut stdout.lock())
}

pub fn run_with_format(
    cmd: Command,
    mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Run { config, workload: path, workload_format, out: trace_out, format, snapshot } => {
            let steps = workload::load_workload(&path, workload_format)?;
            let mut engine = Engine::with_config(config)?;
            let events = workload::run_workload(&mut engine, &steps)?;
            let metrics = engine.metrics_snapshot();
            let entries = if snapshot { engine.snapshot() } else { Vec::new() };
            if let Some(p) = &trace_out {
                export_trace_file(&events, format, p)?;
            }
            match mode {
                OutputMode::Json => {
                    let json = serde_json::json!({
                        "config": engine.config(),
                        "events": if trace_out.is_none() { Some(&events) } else { None },
                        "metrics": metrics,
                        "hit_ratio": metrics.hit_ratio(),
                        "snapshot": if snapshot { Some(&entries) } else { None },
                    });
                    writeln!(out, "{json}")?;
                }
                OutputMode::Plain => {
                    writeln!(out, "{}", summary_line(&metrics))?;
                }
                OutputMode::Human => {
                    if trace_out.is_none() {
                        export_trace(&events, format, &mut *out)?;
                    }
                    writeln!(
                        out,
                        "config: capacity={} eviction={} coherence={}",
                        engine.config().capacity,
                        engine.config().eviction,
                        engine.config().coherence
                    )?;
                    writeln!(out, "summary: {}", summary_line(&metrics))?;
                    if snapshot {
                        writeln!(out, "snapshot (next to evict last):")?;
                        for e in &entries {
                            writeln!(out, "  {}", describe_entry(e))?;
                        }
                    }
                }
            }
            Ok(())
        }
        Command::Compare { config, workload: path, workload_format } => {
            let steps = workload::load_workload(&path, workload_format)?;
            let rows = compare_policies(&config, &steps)?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::to_string(&rows)?)?,
                OutputMode::Plain | OutputMode::Human => {
                    writeln!(out, "coherence={} capacity={}", config.coherence, config.capacity)?;
                    for r in &rows {
                        writeln!(
                            out,
                            "{:<5} hit_ratio={:.3} hits={} misses={} evictions={}",
                            r.eviction.as_str(),
                            r.hit_ratio,
                            r.metrics.hits,
                            r.metrics.misses,
                            r.metrics.capacity_evictions
                        )?;
                    }
                }
            }
            Ok(())
        }
        Command::Generate { spec, out: path } => {
            let steps = workload::generate(&spec);
            let file = File::create(&path)?;
            workload::write_ndjson(&steps, BufWriter::new(file))?;
            match mode {
                OutputMode::Json => {
                    let json = serde_json::json!({"action":"generated","steps": steps.len(),"path": path.display().to_string()});
                    writeln!(out, "{json}")?;
                }
                OutputMode::Plain | OutputMode::Human => {
                    writeln!(out, "generated {} steps -> {}", steps.len(), path.display())?;
                }
            }
            Ok(())
        }
    }
}

fn summary_line(m: &EngineMetricsSnapshot) -> String {
    format!(
        "hits={} misses={} hit_ratio={:.3} admissions={} updates={} evictions={} invalidations={} expirations={} backing_writes={} flushes={}",
        m.hits,
        m.misses,
        m.hit_ratio(),
        m.admissions,
        m.updates,
        m.capacity_evictions,
        m.invalidations,
        m.expirations,
        m.backing_writes,
        m.flushes
    )
}

fn describe_entry(e: &CacheEntry) -> String {
    let expires = e.expires_at.map_or_else(|| "never".to_string(), |t| t.to_string());
    format!(
        "{}={} inserted={} last_access={} count={} expires={} state={:?}",
        e.key, e.value, e.inserted_at, e.last_accessed_at, e.access_count, expires, e.state
    )
}
