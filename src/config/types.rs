use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Quest service endpoints and timeouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g., "http://localhost:5000/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL that server-relative avatar and photo paths resolve against.
    #[serde(default = "default_static_url")]
    pub static_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Map defaults and zoom limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

/// Durable snapshot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Snapshot name; stored under `persist:<key>`.
    #[serde(default = "default_persist_key")]
    pub key: String,
    /// Snapshot schema version. Snapshots with another version are discarded.
    #[serde(default = "default_persist_version")]
    pub version: u32,
    /// Slices mirrored to storage.
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<String>,
    /// Storage directory. Defaults to `<data dir>/questmap`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Photo upload limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted file in bytes (default: 5 MiB).
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Photos per quest completion (default: 5).
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_static_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_longitude() -> f64 {
    37.6173
}

fn default_latitude() -> f64 {
    55.7558
}

fn default_zoom() -> f64 {
    5.0
}

fn default_min_zoom() -> f64 {
    1.0
}

fn default_max_zoom() -> f64 {
    18.0
}

fn default_persist_key() -> String {
    "root".to_string()
}

fn default_persist_version() -> u32 {
    1
}

fn default_whitelist() -> Vec<String> {
    vec!["user".to_string(), "map".to_string()]
}

fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_max_photos() -> usize {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            static_url: default_static_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_longitude: default_longitude(),
            default_latitude: default_latitude(),
            default_zoom: default_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            key: default_persist_key(),
            version: default_persist_version(),
            whitelist: default_whitelist(),
            dir: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_photos: default_max_photos(),
        }
    }
}
