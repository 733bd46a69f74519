mod output;
mod records;
mod serve;
mod settings;

pub use records::{ExecutionsCommand, StatsCommand, UsersCommand, WorkflowsCommand};
pub use serve::ServeCommand;
pub use settings::SettingsCommand;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowdash_core::{FileSettingsStore, FlowdashConfig};
use flowdash_runtime::{DataService, ReqwestTransport};

/// FLOWDASH - n8n workflow dashboard
#[derive(Parser)]
#[command(name = "flowdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true, default_value = "flowdash.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the dashboard API server.
    Serve(ServeCommand),

    /// Show, change or test the n8n connection settings.
    Settings(SettingsCommand),

    /// List and manage workflows.
    Workflows(WorkflowsCommand),

    /// List and stop executions.
    Executions(ExecutionsCommand),

    /// List and remove dashboard users.
    Users(UsersCommand),

    /// Show aggregate stats.
    Stats(StatsCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        let mut config = FlowdashConfig::from_file_or_default(&self.config)
            .with_context(|| format!("loading {}", self.config))?;

        let dev = matches!(&self.command, Commands::Serve(cmd) if cmd.dev);
        crate::logging::init(&config.logging, dev);

        match self.command {
            Commands::Serve(cmd) => {
                cmd.apply_overrides(&mut config);
                let service = build_service(&config)?;
                cmd.execute(&config, service).await
            }
            Commands::Settings(cmd) => cmd.execute(build_service(&config)?).await,
            Commands::Workflows(cmd) => cmd.execute(build_service(&config)?).await,
            Commands::Executions(cmd) => cmd.execute(build_service(&config)?).await,
            Commands::Users(cmd) => cmd.execute(build_service(&config)?).await,
            Commands::Stats(cmd) => cmd.execute(build_service(&config)?).await,
        }
    }
}

/// Wire the data service from configuration.
pub fn build_service(config: &FlowdashConfig) -> Result<Arc<DataService>> {
    let store = Arc::new(FileSettingsStore::new(&config.storage.settings_path));
    let transport = Arc::new(ReqwestTransport::with_timeout(
        config.n8n.timeout_secs.map(Duration::from_secs),
    )?);
    Ok(Arc::new(DataService::new(store, transport)))
}
