// CLI error types and user-facing messages

use rescue_config::ConfigError;
use rescue_pipeline::PipelineError;
use rescue_providers::ProviderError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Input error: {0}")]
    Input(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'rescue --help' for usage information.",
                    message
                )
            }
            CliError::Io(e) => format!("Could not write output: {}", e),
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nRun 'rescue config show' to check your configuration.",
                    msg
                )
            }
            CliError::Provider(msg) => {
                format!(
                    "Provider error: {}\n\nSet the access token (HF_TOKEN by default) or use classifier.provider = \"keyword\".",
                    msg
                )
            }
            CliError::Input(PipelineError::MissingSource { path }) => {
                format!(
                    "Required input not found: {}\n\nCheck the file path; dispatch cannot run without it.",
                    path.display()
                )
            }
            CliError::Input(e) => format!("Could not load input: {}", e),
            CliError::Internal(msg) => format!("Internal error: {}\n\nPlease report this issue.", msg),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        CliError::Provider(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Internal(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
