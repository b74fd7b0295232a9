// Configuration management

use std::{
    io::{self, Write},
    path::PathBuf,
};

use async_trait::async_trait;
use rescue_config::ConfigManager;

use super::Command;
use crate::{error::CliResult, output};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init { force: bool },
}

/// Manage configuration
pub struct ConfigCommand {
    pub action: ConfigAction,
    path: PathBuf,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, path: PathBuf) -> Self {
        Self { action, path }
    }

    fn show(&self) -> CliResult<()> {
        let manager = ConfigManager::with_path(self.path.clone());
        let config = manager.load_config()?;
        write!(io::stdout(), "{}", ConfigManager::to_toml(&config)?)?;
        Ok(())
    }

    fn init(&self, force: bool) -> CliResult<()> {
        let manager = ConfigManager::with_path(self.path.clone());
        manager.init_config(force)?;

        output::print_success(&format!("Wrote default configuration to {}", self.path.display()));
        Ok(())
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        match self.action {
            ConfigAction::Show => self.show(),
            ConfigAction::Init { force } => self.init(force),
        }
    }
}
