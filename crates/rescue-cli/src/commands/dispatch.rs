// Batch dispatch: tickets in, prioritized and matched report out

use std::path::PathBuf;

use async_trait::async_trait;
use rescue_config::DispatchConfig;
use rescue_domain::TriageColor;
use rescue_pipeline::{build_report, load_tickets, save_report, DispatchReportRow};
use tracing::info;

use super::Command;
use crate::{
    error::{CliError, CliResult},
    logging::VerbosityLevel,
    output::{self, OutputStyle},
    setup,
};

/// Report file written when neither a flag nor the config names one
pub const DEFAULT_REPORT_FILE: &str = "final_matched_report.csv";

/// Rows shown in the console preview
const PREVIEW_ROWS: usize = 5;

pub struct DispatchCommand {
    config: DispatchConfig,
    tickets: PathBuf,
    resources: Option<PathBuf>,
    knowledge: Option<PathBuf>,
    output: Option<PathBuf>,
    concurrency: Option<usize>,
}

impl DispatchCommand {
    pub fn new(config: DispatchConfig, tickets: PathBuf) -> Self {
        Self {
            config,
            tickets,
            resources: None,
            knowledge: None,
            output: None,
            concurrency: None,
        }
    }

    pub fn with_resources(mut self, resources: Option<PathBuf>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_knowledge(mut self, knowledge: Option<PathBuf>) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Where the report is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .or_else(|| self.config.paths.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE))
    }

    /// Run the batch and write the report, returning the sorted rows
    pub async fn run(&self) -> CliResult<Vec<DispatchReportRow>> {
        let resources = self
            .resources
            .clone()
            .or_else(|| self.config.paths.resources.clone())
            .ok_or_else(|| CliError::InvalidArgument {
                message: "dispatch needs a resource table (--resources)".to_string(),
            })?;
        let knowledge = self
            .knowledge
            .clone()
            .or_else(|| self.config.paths.knowledge.clone())
            .unwrap_or_else(|| self.tickets.clone());

        let mut config = self.config.clone();
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(CliError::InvalidArgument {
                    message: "--concurrency must be at least 1".to_string(),
                });
            }
            config.batch.concurrency = concurrency;
        }

        let labeler = setup::build_labeler(&config.classifier)?;
        let knowledge_base = setup::load_knowledge(&config, &knowledge, Some(&resources))?;
        let tickets = load_tickets(&self.tickets)?;

        let orchestrator = setup::build_orchestrator(&config, knowledge_base, labeler);
        let records = orchestrator.dispatch_batch(&tickets).await;
        let rows = build_report(&tickets, &records);

        let output = self.output_path();
        save_report(&output, &rows)?;
        info!("Dispatch report saved to {}", output.display());

        Ok(rows)
    }
}

#[async_trait]
impl Command for DispatchCommand {
    async fn execute(&self) -> CliResult<()> {
        let rows = self.run().await?;
        if !VerbosityLevel::Normal.should_output() {
            return Ok(());
        }

        let style = OutputStyle::default();
        let count = |color: TriageColor| rows.iter().filter(|r| r.triage_level == color).count();

        println!("{}", style.section("Dispatch summary"));
        println!("{}", style.key_value("Tickets", &rows.len().to_string()));
        for color in [TriageColor::Red, TriageColor::Yellow, TriageColor::Green] {
            let tally = count(color).to_string();
            println!("{}", style.key_value(color.as_str(), &tally));
        }

        if !rows.is_empty() {
            println!("{}", style.section("Most urgent"));
            for row in rows.iter().take(PREVIEW_ROWS) {
                println!(
                    "  #{} {:>6.2} {} {} @ {} -> {} ({} km)",
                    row.serial,
                    row.urgency_score,
                    style.triage(row.triage_level),
                    row.predicted_need,
                    row.predicted_location,
                    row.assigned_resource_center,
                    row.distance_km
                );
            }
        }

        println!();
        output::print_success(&format!("Report written to {}", self.output_path().display()));
        Ok(())
    }
}
