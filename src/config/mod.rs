//! TOML configuration: file location, defaults and validation.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, MapConfig, PersistenceConfig, UploadConfig};
