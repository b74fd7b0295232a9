//! Rescue Dispatch configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `RESCUE_*` environment variables (`__` separates section and key, e.g.
//! `RESCUE_BATCH__CONCURRENCY=4`).

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use types::{
    BatchConfig, ClassifierConfig, ClassifierProvider, DispatchConfig, LocationConfig, PathsConfig,
};
