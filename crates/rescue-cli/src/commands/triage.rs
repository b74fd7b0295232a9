// Single-ticket triage with JSON output

use std::{
    io::{self, Write},
    path::PathBuf,
};

use async_trait::async_trait;
use rescue_config::DispatchConfig;
use rescue_domain::TicketSummary;

use super::Command;
use crate::{
    error::{CliError, CliResult},
    setup,
};

pub struct TriageCommand {
    config: DispatchConfig,
    text: String,
    knowledge: Option<PathBuf>,
    resources: Option<PathBuf>,
}

impl TriageCommand {
    pub fn new(config: DispatchConfig, text: String) -> Self {
        Self {
            config,
            text,
            knowledge: None,
            resources: None,
        }
    }

    pub fn with_knowledge(mut self, knowledge: Option<PathBuf>) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_resources(mut self, resources: Option<PathBuf>) -> Self {
        self.resources = resources;
        self
    }

    /// Dispatch the text and flatten the record
    ///
    /// Without a resource table the summary carries the "No Resource DB" center.
    pub async fn run(&self) -> CliResult<TicketSummary> {
        if self.text.trim().is_empty() {
            return Err(CliError::InvalidArgument {
                message: "ticket text must not be empty".to_string(),
            });
        }
        let knowledge = self
            .knowledge
            .clone()
            .or_else(|| self.config.paths.knowledge.clone())
            .ok_or_else(|| CliError::InvalidArgument {
                message: "triage needs a knowledge table (--knowledge)".to_string(),
            })?;
        let resources = self
            .resources
            .clone()
            .or_else(|| self.config.paths.resources.clone());

        let labeler = setup::build_labeler(&self.config.classifier)?;
        let knowledge_base =
            setup::load_knowledge(&self.config, &knowledge, resources.as_deref())?;
        let orchestrator = setup::build_orchestrator(&self.config, knowledge_base, labeler);

        Ok(orchestrator.dispatch(&self.text).await.summary())
    }
}

#[async_trait]
impl Command for TriageCommand {
    async fn execute(&self) -> CliResult<()> {
        let summary = self.run().await?;
        writeln!(io::stdout(), "{}", serde_json::to_string_pretty(&summary)?)?;
        Ok(())
    }
}
