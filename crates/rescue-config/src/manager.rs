//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::{debug, info};

use crate::{
    error::{ConfigError, Result},
    types::DispatchConfig,
};

/// File read when no `--config` path is given
pub const DEFAULT_CONFIG_FILE: &str = "rescue.toml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "RESCUE";

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Manager reading `./rescue.toml`
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load defaults, the optional file and environment overrides, then validate
    pub fn load_config(&self) -> Result<DispatchConfig> {
        debug!("Loading configuration from {}", self.config_path.display());

        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: DispatchConfig = builder.build()?.try_deserialize()?;
        self.validate_config(&config)?;
        Ok(config)
    }

    /// Write `config` as TOML, creating parent directories
    pub fn save_config(&self, config: &DispatchConfig) -> Result<()> {
        let toml = Self::to_toml(config)?;
        let parent = self.config_path.parent();
        if let Some(parent) = parent.filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        info!("Wrote configuration to {}", self.config_path.display());
        Ok(())
    }

    /// Write the default configuration, refusing to replace a file unless `force`
    pub fn init_config(&self, force: bool) -> Result<()> {
        if self.config_path.exists() && !force {
            return Err(ConfigError::AlreadyExists(self.config_path.clone()));
        }
        self.save_config(&DispatchConfig::default())
    }

    pub fn to_toml(config: &DispatchConfig) -> Result<String> {
        Ok(toml::to_string_pretty(config)?)
    }

    pub fn validate_config(&self, config: &DispatchConfig) -> Result<()> {
        let classifier = &config.classifier;
        if classifier.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "classifier.model must not be empty".to_string(),
            ));
        }
        if !classifier.hypothesis_template.contains("{}") {
            return Err(ConfigError::Validation(
                "classifier.hypothesis_template must contain a {} placeholder".to_string(),
            ));
        }
        if classifier.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "classifier.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if classifier.token_env.trim().is_empty() {
            return Err(ConfigError::Env(
                "classifier.token_env must name an environment variable".to_string(),
            ));
        }

        let location = &config.location;
        if !(0.0..=100.0).contains(&location.fuzzy_threshold) {
            return Err(ConfigError::Validation(format!(
                "location.fuzzy_threshold must be within 0-100, got {}",
                location.fuzzy_threshold
            )));
        }
        if !(-90.0..=90.0).contains(&location.default_latitude) {
            return Err(ConfigError::Validation(format!(
                "location.default_latitude out of range: {}",
                location.default_latitude
            )));
        }
        if !(-180.0..=180.0).contains(&location.default_longitude) {
            return Err(ConfigError::Validation(format!(
                "location.default_longitude out of range: {}",
                location.default_longitude
            )));
        }
        if location.default_location.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location.default_location must not be empty".to_string(),
            ));
        }

        if config.batch.concurrency == 0 {
            return Err(ConfigError::Validation(
                "batch.concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
