use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use flowdash_core::FlowdashConfig;
use flowdash_runtime::{create_app, DashboardState, DataMode, DataService};
use tracing::info;

/// Run the dashboard API server.
#[derive(Parser)]
pub struct ServeCommand {
    /// Port to listen on (overrides config).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Enable development mode (verbose logging).
    #[arg(long)]
    pub dev: bool,
}

impl ServeCommand {
    /// Apply command-line overrides to the loaded configuration.
    pub fn apply_overrides(&self, config: &mut FlowdashConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
    }

    /// Execute the serve command.
    pub async fn execute(self, config: &FlowdashConfig, service: Arc<DataService>) -> Result<()> {
        let addr = config.server.bind_addr();

        println!();
        println!(
            "  {}  v{}",
            style("FLOWDASH").bold().cyan(),
            env!("CARGO_PKG_VERSION")
        );
        println!();
        println!(
            "  {} API at {}",
            style("→").bold(),
            style(format!("http://{}{}", addr, config.server.api_prefix)).cyan()
        );
        let mode = match service.mode() {
            DataMode::Live => style(format!("live ({})", service.settings().base_url)).green(),
            DataMode::Demo => style("demo data".to_string()).yellow(),
        };
        println!("  {} Serving {}", style("→").bold(), mode);
        if self.dev {
            println!("  {} Development mode enabled", style("→").bold());
        }
        println!();

        let app = create_app(DashboardState::new(service), &config.server.api_prefix);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {}", addr))?;

        info!(%addr, "Dashboard API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        println!("\n  {} Goodbye!", style("✓").bold());
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
