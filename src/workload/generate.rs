use super::WorkloadStep;
use crate::operation::Operation;
use crate::types::Ticks;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parameters for a synthetic workload.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkloadSpec {
    pub ops: usize,
    pub keys: usize,
    /// Probability that an operation is a `get`.
    pub read_ratio: f64,
    pub ttl: Option<Ticks>,
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self { ops: 100, keys: 16, read_ratio: 0.7, ttl: None, seed: 42 }
    }
}

/// Generates a skewed read/write mix over `keys` keys. Lower-numbered keys are
/// hotter. The same `WorkloadSpec` always yields the same stream.
pub fn generate(spec: &WorkloadSpec) -> Vec<WorkloadStep> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let keys = spec.keys.max(1);
    let read_ratio = spec.read_ratio.clamp(0.0, 1.0);
    let mut steps = Vec::with_capacity(spec.ops);
    for n in 0..spec.ops {
        let u: f64 = rng.random();
        let idx = ((u * u) * keys as f64) as usize;
        let key = format!("k{}", idx.min(keys - 1));
        let op = if rng.random_bool(read_ratio) {
            Operation::Get { key }
        } else {
            Operation::Put { key, value: format!("v{n}"), ttl: spec.ttl }
        };
        steps.push(WorkloadStep::Op(op));
    }
    steps
}
