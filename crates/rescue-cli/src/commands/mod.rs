// Command handlers for the rescue CLI

pub mod config;
pub mod dispatch;
pub mod evaluate;
pub mod triage;

pub use config::{ConfigAction, ConfigCommand};
pub use dispatch::DispatchCommand;
pub use evaluate::EvaluateCommand;
pub use triage::TriageCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
