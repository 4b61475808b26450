//! cachesim: a deterministic cache behavior simulation engine.
//!
//! Given a capacity, an eviction policy and a write-coherence protocol, the
//! [`Engine`] applies a stream of `get`/`put` operations strictly in order and
//! records every admission, hit, eviction and backing-store write as a
//! [`TraceEvent`]. Replaying the same stream against the same configuration
//! always yields the same trace.

pub mod cache;
pub mod cli;
pub mod clock;
pub mod coherence;
pub mod engine;
pub mod errors;
pub mod export;
pub mod operation;
pub mod policy;
pub mod trace;
pub mod types;
pub mod utils;
pub mod workload;

pub use utils::logger;

pub use cache::{CacheEntry, CoherenceKind, Configuration, EvictionPolicyKind};
pub use engine::{Engine, SharedEngine};
pub use errors::EngineError;
pub use operation::Operation;
pub use trace::{EvictionReason, TraceEvent};

/// Initializes logging from the `CACHESIM_LOG_*` environment variables.
///
/// Call once, before building engines, if log output is wanted.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::configure_from_env()?;
    Ok(())
}
