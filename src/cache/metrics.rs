use serde::Serialize;

/// Counters for observing engine behavior over a run.
#[derive(Debug, Default, Clone)]
pub struct EngineMetrics {
    pub hits: u64,
    pub misses: u64,
    pub admissions: u64,
    pub updates: u64,
    pub capacity_evictions: u64,
    pub invalidations: u64,
    pub expirations: u64,
    pub backing_writes: u64,
    pub flushes: u64,
}

impl EngineMetrics {
    pub fn snapshot(&self) -> EngineMetricsSnapshot {
        EngineMetricsSnapshot {
            hits: self.hits,
            misses: self.misses,
            admissions: self.admissions,
            updates: self.updates,
            capacity_evictions: self.capacity_evictions,
            invalidations: self.invalidations,
            expirations: self.expirations,
            backing_writes: self.backing_writes,
            flushes: self.flushes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineMetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub admissions: u64,
    pub updates: u64,
    pub capacity_evictions: u64,
    pub invalidations: u64,
    pub expirations: u64,
    pub backing_writes: u64,
    pub flushes: u64,
}

impl EngineMetricsSnapshot {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the cache; 0.0 before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.lookups();
        if total == 0 { 0.0 } else { self.hits as f64 / total as f64 }
    }
}
