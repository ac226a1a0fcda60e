use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bookkeeping stored next to the slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub version: u32,
}

/// The stored document: `{"_persist": {"version": N}, "<slice>": {...}, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    #[serde(rename = "_persist")]
    pub meta: SnapshotMeta,
    #[serde(flatten)]
    pub slices: BTreeMap<String, Value>,
}

impl PersistedSnapshot {
    pub fn new(version: u32) -> Self {
        Self {
            meta: SnapshotMeta { version },
            slices: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.meta.version
    }

    pub fn slice(&self, name: &str) -> Option<&Value> {
        self.slices.get(name)
    }
}
