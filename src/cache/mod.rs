mod config;
mod entry;
mod metrics;
mod store;

pub use config::{CoherenceKind, Configuration, EvictionPolicyKind};
pub use entry::{CacheEntry, DirtyState};
pub use metrics::{EngineMetrics, EngineMetricsSnapshot};
pub use store::{Admission, EntryStore, Lookup};
