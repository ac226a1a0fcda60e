//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

pub mod mock_service;

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use questmap::model::{Coordinates, Friend, Quest, QuestCompletion, User};
use questmap::persist::{MemoryStorage, PersistConfig, Persistor};
use questmap::store::map::ViewportState;
use questmap::store::Store;
use questmap::worker::{ApiCommand, RequestSink};
use tempfile::TempDir;

pub fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        avatar: String::new(),
        completed_quests: Vec::new(),
        friends: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

pub fn quest(id: &str, city: &str, longitude: f64, latitude: f64) -> Quest {
    Quest {
        id: id.to_string(),
        country: "Italy".to_string(),
        city: city.to_string(),
        coordinates: Coordinates {
            longitude,
            latitude,
            zoom: 12.0,
        },
        description: format!("Find the old fountain in {city}"),
        photo_url: String::new(),
        coupon: String::new(),
        completion_date: None,
    }
}

pub fn completion(id: &str, city: &str) -> QuestCompletion {
    QuestCompletion {
        id: id.to_string(),
        country: "Italy".to_string(),
        city: city.to_string(),
        description: String::new(),
        comment: String::new(),
        photo_url: String::new(),
        images: vec!["/uploads/1.jpg".to_string()],
        coupon: "SAVE10".to_string(),
        completion_date: Some("2024-05-01T12:00:00Z".to_string()),
    }
}

pub fn friend(id: &str, user_id: &str, username: &str) -> Friend {
    Friend {
        id: id.to_string(),
        user_id: user_id.to_string(),
        added_at: None,
        username: username.to_string(),
        avatar: String::new(),
    }
}

/// Store persisting into `storage` with the default whitelist.
pub fn persisted_store(storage: &MemoryStorage) -> Store {
    let persistor = Persistor::new(PersistConfig::default(), Arc::new(storage.clone()));
    Store::with_persistor(ViewportState::default(), persistor)
}

/// Raw snapshot JSON stored under the default key.
pub fn stored_snapshot(storage: &MemoryStorage) -> Option<serde_json::Value> {
    use questmap::persist::StorageEngine;
    storage
        .get_item("persist:root")
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

/// Write `len` bytes starting with a JPEG signature.
pub fn write_jpeg(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    let mut bytes = vec![0u8; len];
    bytes[..4].copy_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
    file.write_all(&bytes).unwrap();
    path
}

/// Write a PNG signature followed by padding.
pub fn write_png(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = vec![0u8; len.max(8)];
    bytes[..8].copy_from_slice(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Request sink that records instead of sending.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub submitted: Rc<RefCell<Vec<(u64, ApiCommand)>>>,
    pub sessions_ended: Rc<RefCell<usize>>,
}

impl RecordingSink {
    pub fn commands(&self) -> Vec<ApiCommand> {
        self.submitted.borrow().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn last(&self) -> Option<(u64, ApiCommand)> {
        self.submitted.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.submitted.borrow_mut().clear();
    }
}

impl RequestSink for RecordingSink {
    fn submit(&self, epoch: u64, command: ApiCommand) {
        self.submitted.borrow_mut().push((epoch, command));
    }

    fn end_session(&self) {
        *self.sessions_ended.borrow_mut() += 1;
    }
}
