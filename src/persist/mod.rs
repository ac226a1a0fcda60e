//! Durable mirror of whitelisted store slices.
//!
//! On startup [`Persistor::rehydrate`] seeds a fresh [`AppState`] from the
//! stored snapshot; afterwards every change to a whitelisted slice rewrites
//! the snapshot in the background. The snapshot is a cache: any read problem
//! is logged and the store simply starts from defaults.
//!
//! Snapshots carry a version. There is no migration path; a snapshot whose
//! version differs from the configured one is discarded.

mod engine;
mod snapshot;
mod writer;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

pub use engine::{FileStorage, MemoryStorage, StorageEngine, StorageError};
pub use snapshot::{PersistedSnapshot, SnapshotMeta};

use crate::store::{AppState, Slice};
use writer::{SnapshotWriter, WriteOp};

/// Persistence settings: storage key, snapshot version and whitelist.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistConfig {
    pub key: String,
    pub version: u32,
    /// Slices written to storage, in snapshot order.
    pub whitelist: Vec<Slice>,
}

impl PersistConfig {
    pub fn new(key: impl Into<String>, version: u32, whitelist: Vec<Slice>) -> Self {
        Self {
            key: key.into(),
            version,
            whitelist,
        }
    }

    /// Key under which the snapshot is stored.
    pub fn storage_key(&self) -> String {
        format!("persist:{}", self.key)
    }
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self::new("root", 1, vec![Slice::User, Slice::Map])
    }
}

/// What happened during rehydration.
#[derive(Debug, Clone, PartialEq)]
pub enum Rehydration {
    /// Snapshot found; these slices were restored.
    Restored { slices: Vec<Slice> },
    /// Nothing stored yet.
    Absent,
    /// The engine failed to read.
    Unreadable,
    /// Stored data is not a snapshot.
    Corrupt,
    /// Snapshot from another schema version; ignored.
    VersionMismatch { found: u32, expected: u32 },
}

impl fmt::Display for Rehydration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rehydration::Restored { slices } => {
                let names: Vec<&str> = slices.iter().map(Slice::as_str).collect();
                write!(f, "restored [{}]", names.join(", "))
            }
            Rehydration::Absent => write!(f, "no snapshot"),
            Rehydration::Unreadable => write!(f, "snapshot unreadable"),
            Rehydration::Corrupt => write!(f, "snapshot corrupt"),
            Rehydration::VersionMismatch { found, expected } => {
                write!(f, "snapshot version {} (expected {})", found, expected)
            }
        }
    }
}

pub struct Persistor {
    config: PersistConfig,
    engine: Arc<dyn StorageEngine>,
    writer: SnapshotWriter,
    /// Slices whose entry was purged and must stay out of the snapshot
    /// until they change again.
    cleared: BTreeSet<Slice>,
}

impl Persistor {
    pub fn new(config: PersistConfig, engine: Arc<dyn StorageEngine>) -> Self {
        let writer = SnapshotWriter::spawn(Arc::clone(&engine));
        Self {
            config,
            engine,
            writer,
            cleared: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    pub fn is_persisted(&self, slice: Slice) -> bool {
        self.config.whitelist.contains(&slice)
    }

    /// Seed `state` from the stored snapshot.
    ///
    /// Only whitelisted slices are restored; anything else in the snapshot
    /// is ignored. A whitelisted slice that fails to decode keeps its
    /// default while the others are still restored.
    pub fn rehydrate(&self, state: &mut AppState) -> Rehydration {
        let key = self.config.storage_key();
        let raw = match self.engine.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %key, "No persisted snapshot, starting from defaults");
                return Rehydration::Absent;
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Snapshot unreadable, starting from defaults");
                return Rehydration::Unreadable;
            }
        };

        let snapshot: PersistedSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Snapshot corrupt, starting from defaults");
                return Rehydration::Corrupt;
            }
        };

        if snapshot.version() != self.config.version {
            tracing::warn!(
                key = %key,
                found = snapshot.version(),
                expected = self.config.version,
                "Snapshot version mismatch, discarding"
            );
            return Rehydration::VersionMismatch {
                found: snapshot.version(),
                expected: self.config.version,
            };
        }

        let mut restored = Vec::new();
        for slice in &self.config.whitelist {
            let Some(value) = snapshot.slice(slice.as_str()) else {
                continue;
            };
            match state.restore_slice(*slice, value.clone()) {
                Ok(()) => restored.push(*slice),
                Err(err) => {
                    tracing::warn!(slice = %slice, error = %err, "Persisted slice invalid, using default");
                }
            }
        }

        Rehydration::Restored { slices: restored }
    }

    /// Mirror the whitelisted slices after `changed` was updated.
    pub fn persist(&mut self, state: &AppState, changed: Slice) {
        self.cleared.remove(&changed);
        self.write(state);
    }

    /// Drop `slice` from the stored snapshot (logout clears `user`).
    pub fn purge(&mut self, slice: Slice, state: &AppState) {
        if !self.is_persisted(slice) {
            return;
        }
        self.cleared.insert(slice);
        self.write(state);
    }

    /// Block until queued writes have reached the engine.
    ///
    /// Writes submitted afterwards go straight to the engine.
    pub fn flush(&mut self) {
        self.writer.flush();
    }

    /// Build the snapshot that `state` would be stored as.
    pub fn snapshot(&self, state: &AppState) -> PersistedSnapshot {
        let mut snapshot = PersistedSnapshot::new(self.config.version);
        for slice in &self.config.whitelist {
            if self.cleared.contains(slice) {
                continue;
            }
            match state.slice_value(*slice) {
                Ok(value) => {
                    snapshot.slices.insert(slice.as_str().to_string(), value);
                }
                Err(err) => {
                    tracing::warn!(slice = %slice, error = %err, "Slice not serializable, skipped");
                }
            }
        }
        snapshot
    }

    fn write(&self, state: &AppState) {
        let snapshot = self.snapshot(state);
        match serde_json::to_string(&snapshot) {
            Ok(value) => self.writer.submit(WriteOp {
                key: self.config.storage_key(),
                value,
            }),
            Err(err) => tracing::warn!(error = %err, "Failed to encode snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::map::ViewportState;

    fn persistor(storage: &MemoryStorage) -> Persistor {
        Persistor::new(PersistConfig::default(), Arc::new(storage.clone()))
    }

    #[test]
    fn storage_key_is_prefixed() {
        assert_eq!(PersistConfig::default().storage_key(), "persist:root");
    }

    #[test]
    fn absent_snapshot_leaves_defaults() {
        let storage = MemoryStorage::new();
        let mut state = AppState::default();
        assert_eq!(persistor(&storage).rehydrate(&mut state), Rehydration::Absent);
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn snapshot_skips_non_whitelisted_slices() {
        let storage = MemoryStorage::new();
        let snapshot = persistor(&storage).snapshot(&AppState::default());
        let keys: Vec<&str> = snapshot.slices.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["map", "user"]);
    }

    #[test]
    fn purge_of_non_whitelisted_slice_writes_nothing() {
        let storage = MemoryStorage::new();
        let mut p = persistor(&storage);
        p.purge(Slice::Quest, &AppState::default());
        p.flush();
        assert!(storage.is_empty());
    }

    #[test]
    fn purged_slice_returns_once_changed() {
        let storage = MemoryStorage::new();
        let mut p = persistor(&storage);
        let state = AppState::with_viewport(ViewportState::new(1.0, 2.0, 3.0));

        p.purge(Slice::User, &state);
        assert!(!p.snapshot(&state).slices.contains_key("user"));

        p.persist(&state, Slice::User);
        assert!(p.snapshot(&state).slices.contains_key("user"));
    }

    #[test]
    fn display_names_restored_slices() {
        let outcome = Rehydration::Restored {
            slices: vec![Slice::User, Slice::Map],
        };
        assert_eq!(outcome.to_string(), "restored [user, map]");
    }
}
