//! Error types for the providers module

use thiserror::Error;

/// Errors that can occur when calling a classification provider
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProviderError {
    /// Authentication failed (never includes key details)
    #[error("Authentication failed")]
    AuthError,

    /// Rate limited by provider
    #[error("Rate limited by provider")]
    RateLimited,

    /// Request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Network error occurred
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Provider answered with a non-success status or an error payload
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Response could not be interpreted
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider produced no usable label
    #[error("No label produced for input")]
    NoLabel,
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::ParseError(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_connect() {
            ProviderError::NetworkError(err.to_string())
        } else if err.is_decode() {
            ProviderError::ParseError(err.to_string())
        } else {
            ProviderError::ProviderError(err.to_string())
        }
    }
}
