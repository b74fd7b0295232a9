// Accuracy evaluation against the ground truth in a ticket table

use std::path::PathBuf;

use async_trait::async_trait;
use rescue_config::DispatchConfig;
use rescue_pipeline::{evaluate, load_tickets, AccuracyReport};

use super::Command;
use crate::{
    error::CliResult,
    output::{self, OutputStyle},
    setup,
};

pub struct EvaluateCommand {
    config: DispatchConfig,
    tickets: PathBuf,
    knowledge: Option<PathBuf>,
    resources: Option<PathBuf>,
}

impl EvaluateCommand {
    pub fn new(config: DispatchConfig, tickets: PathBuf) -> Self {
        Self {
            config,
            tickets,
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

    pub async fn run(&self) -> CliResult<AccuracyReport> {
        let knowledge = self
            .knowledge
            .clone()
            .or_else(|| self.config.paths.knowledge.clone())
            .unwrap_or_else(|| self.tickets.clone());
        let resources = self
            .resources
            .clone()
            .or_else(|| self.config.paths.resources.clone());

        let labeler = setup::build_labeler(&self.config.classifier)?;
        let knowledge_base =
            setup::load_knowledge(&self.config, &knowledge, resources.as_deref())?;
        let tickets = load_tickets(&self.tickets)?;

        let orchestrator = setup::build_orchestrator(&self.config, knowledge_base, labeler);
        let records = orchestrator.dispatch_batch(&tickets).await;
        Ok(evaluate(&tickets, &records))
    }
}

fn percent(metric: Option<f64>) -> String {
    metric
        .map(|m| format!("{:.2}%", m * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

#[async_trait]
impl Command for EvaluateCommand {
    async fn execute(&self) -> CliResult<()> {
        let report = self.run().await?;
        let style = OutputStyle::default();

        if report.need_accuracy.is_none() && report.location_accuracy.is_none() {
            output::print_warning(
                "No ground-truth need or location columns found in the ticket table",
            );
        }

        let metrics = [
            ("Tickets", report.tickets.to_string()),
            ("Need", percent(report.need_accuracy)),
            ("Location", percent(report.location_accuracy)),
            ("Quantity", percent(report.quantity_extraction_rate)),
            ("Overall", percent(report.overall)),
        ];

        println!("{}", style.section("Accuracy"));
        for (label, value) in &metrics {
            println!("{}", style.key_value(label, value));
        }
        output::print_info(&format!(
            "Location containment rate (lenient): {}",
            percent(report.location_containment_rate)
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(Some(0.5)), "50.00%");
        assert_eq!(percent(None), "n/a");
    }
}
