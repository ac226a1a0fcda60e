use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, PersistenceConfig};
use crate::persist::PersistConfig;
use crate::store::map::ViewportState;
use crate::store::Slice;
use crate::upload::UploadLimits;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/questmap/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("questmap").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Map defaults are finite and `min_zoom <= max_zoom`
    /// - The persistence key is non-empty and the whitelist names known slices
    /// - Upload limits are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let map = &self.map;
        let finite = [
            map.default_longitude,
            map.default_latitude,
            map.default_zoom,
            map.min_zoom,
            map.max_zoom,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(invalid("Map defaults must be finite numbers"));
        }
        if map.min_zoom > map.max_zoom {
            return Err(invalid(format!(
                "min_zoom ({}) is greater than max_zoom ({})",
                map.min_zoom, map.max_zoom
            )));
        }

        if self.persistence.key.trim().is_empty() {
            return Err(invalid("Persistence key must not be empty"));
        }
        self.persistence.slices()?;

        if self.upload.max_file_bytes == 0 || self.upload.max_photos == 0 {
            return Err(invalid("Upload limits must be greater than zero"));
        }

        Ok(())
    }

    /// Viewport the map starts at and resets to.
    pub fn default_viewport(&self) -> ViewportState {
        ViewportState::new(
            self.map.default_longitude,
            self.map.default_latitude,
            self.map.default_zoom,
        )
    }

    /// Persistence settings for the store.
    pub fn persist_config(&self) -> Result<PersistConfig, ConfigError> {
        Ok(PersistConfig::new(
            self.persistence.key.clone(),
            self.persistence.version,
            self.persistence.slices()?,
        ))
    }

    /// Directory holding the snapshot files.
    pub fn state_dir(&self) -> PathBuf {
        match &self.persistence.dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("questmap"),
        }
    }

    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits {
            max_file_bytes: self.upload.max_file_bytes,
            max_photos: self.upload.max_photos,
        }
    }
}

impl PersistenceConfig {
    /// Whitelist as slice names, rejecting unknown entries.
    pub fn slices(&self) -> Result<Vec<Slice>, ConfigError> {
        let mut slices = Vec::with_capacity(self.whitelist.len());
        for name in &self.whitelist {
            let slice = Slice::parse(name)
                .ok_or_else(|| invalid(format!("Unknown slice '{}' in persistence whitelist", name)))?;
            if !slices.contains(&slice) {
                slices.push(slice);
            }
        }
        Ok(slices)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
