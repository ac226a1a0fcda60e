//! Key-value storage backends for persisted snapshots.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// String-keyed durable storage, modelled on the browser's `localStorage`.
pub trait StorageEngine: Send + Sync + 'static {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key inside a state directory.
///
/// Writes go to a temporary file that is renamed over the target while an
/// exclusive lock is held on `<name>.lock`, so two client processes never
/// interleave a snapshot.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`. Separators are flattened so keys like
    /// `persist:root` stay inside the directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    fn lock(&self, path: &Path) -> Result<File, StorageError> {
        let lock_path = path.with_extension("lock");
        let write_err = |source| StorageError::Write {
            path: lock_path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(write_err)?;
        FileExt::lock_exclusive(&file).map_err(write_err)?;
        Ok(file)
    }
}

impl StorageEngine for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let lock = self.lock(&path)?;
        // Lock is released when the handle closes, on every return path.
        let _lock = scopeguard::guard(lock, |file| {
            let _ = FileExt::unlock(&file);
        });

        let tmp = path.with_extension("json.tmp");
        let write_err = |source| StorageError::Write {
            path: path.clone(),
            source,
        };
        let mut file = File::create(&tmp).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

/// In-process storage. Clones share the same map, which lets tests keep a
/// handle on what the writer thread stored.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl StorageEngine for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("state"));

        assert_eq!(storage.get_item("persist:root").unwrap(), None);
        storage.set_item("persist:root", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get_item("persist:root").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        storage.remove_item("persist:root").unwrap();
        assert_eq!(storage.get_item("persist:root").unwrap(), None);
        // Removing twice is fine.
        storage.remove_item("persist:root").unwrap();
    }

    #[test]
    fn file_storage_keeps_keys_inside_dir() {
        let storage = FileStorage::new("/tmp/questmap");
        let path = storage.path_for("../persist:root");
        assert_eq!(path, PathBuf::from("/tmp/questmap/___persist_root.json"));
    }

    #[test]
    fn memory_storage_clones_share_items() {
        let storage = MemoryStorage::new();
        let probe = storage.clone();
        storage.set_item("k", "v").unwrap();
        assert_eq!(probe.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(probe.len(), 1);
    }
}
