// Command routing and dispatch

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rescue_config::{ConfigManager, DispatchConfig, DEFAULT_CONFIG_FILE};
use tracing::debug;

use crate::{commands::*, error::CliResult};

/// Rescue Dispatch - triage and resource matching for emergency messages
#[derive(Parser, Debug)]
#[command(name = "rescue")]
#[command(bin_name = "rescue")]
#[command(about = "Triage free-text emergency messages and match them to resource centers")]
#[command(
    long_about = "Rescue Dispatch turns raw emergency messages into prioritized, geolocated dispatch records.\n\nEach message is classified by need, resolved to a known landmark, scored for urgency\n(red / yellow / green) and assigned the nearest resource center able to serve it."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ./rescue.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Process a ticket table and write the dispatch report
    #[command(about = "Triage every ticket in a table and write a prioritized, matched report")]
    Dispatch {
        /// Ticket table (needs a `text` column)
        #[arg(long, value_name = "FILE")]
        tickets: PathBuf,

        /// Resource center table
        #[arg(long, value_name = "FILE")]
        resources: Option<PathBuf>,

        /// Landmark table (default: the ticket table)
        #[arg(long, value_name = "FILE")]
        knowledge: Option<PathBuf>,

        /// Report destination
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Tickets processed concurrently
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
    },

    /// Triage a single message and print it as JSON
    #[command(about = "Triage one message and print the result as JSON")]
    Triage {
        /// Landmark table
        #[arg(long, value_name = "FILE")]
        knowledge: Option<PathBuf>,

        /// Resource center table
        #[arg(long, value_name = "FILE")]
        resources: Option<PathBuf>,

        /// Message text
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Measure accuracy against ground-truth columns
    #[command(about = "Measure need, location and quantity accuracy against ground truth")]
    Evaluate {
        /// Ticket table with `need` and `location_mentioned` columns
        #[arg(long, value_name = "FILE")]
        tickets: PathBuf,

        /// Landmark table (default: the ticket table)
        #[arg(long, value_name = "FILE")]
        knowledge: Option<PathBuf>,

        /// Resource center table
        #[arg(long, value_name = "FILE")]
        resources: Option<PathBuf>,
    },

    /// Manage configuration settings
    #[command(about = "Show or initialize the configuration file")]
    Config {
        #[command(subcommand)]
        action: ConfigSubcommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Destination (default: the --config path or ./rescue.toml)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Routes parsed arguments to command handlers
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli).await
    }

    /// Execute a command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        match &cli.command {
            Commands::Dispatch {
                tickets,
                resources,
                knowledge,
                output,
                concurrency,
            } => {
                let cmd = DispatchCommand::new(Self::load_config(&config_path)?, tickets.clone())
                    .with_resources(resources.clone())
                    .with_knowledge(knowledge.clone())
                    .with_output(output.clone())
                    .with_concurrency(*concurrency);
                cmd.execute().await
            }
            Commands::Triage {
                knowledge,
                resources,
                text,
            } => {
                let cmd = TriageCommand::new(Self::load_config(&config_path)?, text.clone())
                    .with_knowledge(knowledge.clone())
                    .with_resources(resources.clone());
                cmd.execute().await
            }
            Commands::Evaluate {
                tickets,
                knowledge,
                resources,
            } => {
                let cmd = EvaluateCommand::new(Self::load_config(&config_path)?, tickets.clone())
                    .with_knowledge(knowledge.clone())
                    .with_resources(resources.clone());
                cmd.execute().await
            }
            Commands::Config { action } => {
                let cmd = match action {
                    ConfigSubcommand::Show => ConfigCommand::new(ConfigAction::Show, config_path),
                    ConfigSubcommand::Init { path, force } => ConfigCommand::new(
                        ConfigAction::Init { force: *force },
                        path.clone().unwrap_or(config_path),
                    ),
                };
                cmd.execute().await
            }
        }
    }

    fn load_config(path: &Path) -> CliResult<DispatchConfig> {
        debug!("Using configuration file {}", path.display());
        Ok(ConfigManager::with_path(path.to_path_buf()).load_config()?)
    }
}
