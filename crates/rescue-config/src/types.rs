//! Configuration types and their defaults

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Complete dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DispatchConfig {
    pub classifier: ClassifierConfig,
    pub location: LocationConfig,
    pub batch: BatchConfig,
    pub paths: PathsConfig,
}

/// Which labeler backs need classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    /// Hosted zero-shot model (needs an access token)
    #[default]
    HuggingFace,
    /// Offline keyword matching
    Keyword,
}

/// Need classifier settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub provider: ClassifierProvider,
    /// Zero-shot model id
    pub model: String,
    /// Inference API base URL
    pub endpoint: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Hypothesis sentence with a `{}` placeholder for the label
    pub hypothesis_template: String,
    /// Name of the environment variable holding the access token
    pub token_env: String,
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Access token from the configured environment variable, if set
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::HuggingFace,
            model: "MoritzLaurer/deberta-v3-large-zeroshot-v2.0".to_string(),
            endpoint: "https://router.huggingface.co/hf-inference".to_string(),
            timeout_secs: 30,
            hypothesis_template: "This emergency message indicates a need for {}.".to_string(),
            token_env: "HF_TOKEN".to_string(),
        }
    }
}

/// Location resolution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// Name reported when no landmark matches
    pub default_location: String,
    pub default_latitude: f64,
    pub default_longitude: f64,
    /// Fuzzy matches must score strictly above this (0-100)
    pub fuzzy_threshold: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_location: "chennai general".to_string(),
            default_latitude: 13.0827,
            default_longitude: 80.2707,
            fuzzy_threshold: 85.0,
        }
    }
}

/// Batch execution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Tickets processed concurrently
    pub concurrency: usize,
    /// Minimum spacing between classification calls
    pub request_interval_ms: u64,
}

impl BatchConfig {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            request_interval_ms: 50,
        }
    }
}

/// Default input and output locations; command-line flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PathsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}
