use crate::errors::EngineError;
use crate::types::Ticks;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Eviction orderings the engine can run with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvictionPolicyKind {
    Lru,
    Lfu,
    Fifo,
    Ttl,
}

impl EvictionPolicyKind {
    pub const ALL: [EvictionPolicyKind; 4] = [
        EvictionPolicyKind::Lru,
        EvictionPolicyKind::Lfu,
        EvictionPolicyKind::Fifo,
        EvictionPolicyKind::Ttl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EvictionPolicyKind::Lru => "lru",
            EvictionPolicyKind::Lfu => "lfu",
            EvictionPolicyKind::Fifo => "fifo",
            EvictionPolicyKind::Ttl => "ttl",
        }
    }
}

impl FromStr for EvictionPolicyKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicyKind::Lru),
            "lfu" => Ok(EvictionPolicyKind::Lfu),
            "fifo" => Ok(EvictionPolicyKind::Fifo),
            "ttl" => Ok(EvictionPolicyKind::Ttl),
            other => Err(EngineError::UnknownKind(format!("eviction policy '{other}'"))),
        }
    }
}

impl fmt::Display for EvictionPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-coherence protocols between the cache and the backing store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoherenceKind {
    WriteThrough,
    WriteBack,
    WriteAround,
}

impl CoherenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CoherenceKind::WriteThrough => "write-through",
            CoherenceKind::WriteBack => "write-back",
            CoherenceKind::WriteAround => "write-around",
        }
    }
}

impl FromStr for CoherenceKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "write-through" | "through" => Ok(CoherenceKind::WriteThrough),
            "write-back" | "back" => Ok(CoherenceKind::WriteBack),
            "write-around" | "around" => Ok(CoherenceKind::WriteAround),
            other => Err(EngineError::UnknownKind(format!("coherence protocol '{other}'"))),
        }
    }
}

impl fmt::Display for CoherenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one simulation run. Immutable once the engine is built;
/// changing policy means constructing a new engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub capacity: usize,
    pub eviction: EvictionPolicyKind,
    pub coherence: CoherenceKind,
    pub default_ttl: Option<Ticks>,
    /// Admit the backing store's durable value on a read miss.
    pub read_fill: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            capacity: 8,
            eviction: EvictionPolicyKind::Lru,
            coherence: CoherenceKind::WriteThrough,
            default_ttl: None,
            read_fill: false,
        }
    }
}

impl Configuration {
    pub fn new(
        capacity: usize,
        eviction: EvictionPolicyKind,
        coherence: CoherenceKind,
        default_ttl: Option<Ticks>,
    ) -> Self {
        Self { capacity, eviction, coherence, default_ttl, read_fill: false }
    }

    #[must_use]
    pub fn with_read_fill(mut self, enabled: bool) -> Self {
        self.read_fill = enabled;
        self
    }

    /// # Errors
    /// Returns `InvalidConfig` when `capacity` is zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.capacity == 0 {
            return Err(EngineError::InvalidConfig("capacity must be greater than zero".into()));
        }
        Ok(())
    }

    /// Parse a configuration from TOML. Keys may sit at the top level or under `[simulation]`.
    ///
    /// # Errors
    /// Returns a TOML error on malformed input, or `InvalidConfig` if the result does not validate.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let mut table = toml::from_str::<toml::Table>(s)?;
        let cfg: Configuration = match table.remove("simulation") {
            Some(section) => section.try_into::<Configuration>()?,
            None => toml::Value::Table(table).try_into::<Configuration>()?,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
