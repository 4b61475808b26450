use crate::types::{Key, Ticks, Value};
use serde::{Deserialize, Serialize};

/// One cache operation. The engine stamps it with a logical time when applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Get { key: Key },
    Put {
        key: Key,
        value: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ttl: Option<Ticks>,
    },
}

impl Operation {
    pub fn get(key: impl Into<Key>) -> Self {
        Operation::Get { key: key.into() }
    }

    pub fn put(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Operation::Put { key: key.into(), value: value.into(), ttl: None }
    }

    pub fn put_with_ttl(key: impl Into<Key>, value: impl Into<Value>, ttl: Ticks) -> Self {
        Operation::Put { key: key.into(), value: value.into(), ttl: Some(ttl) }
    }

    pub fn key(&self) -> &Key {
        match self {
            Operation::Get { key } | Operation::Put { key, .. } => key,
        }
    }
}
