use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use console::style;
use flowdash_core::N8nSettings;
use flowdash_runtime::DataService;

use super::output;

/// n8n connection settings.
#[derive(Parser)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the stored settings (API key masked).
    Show {
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },
    /// Update the stored settings. Unset flags keep their current value.
    Set {
        /// Base URL of the n8n API, e.g. https://n8n.example.com/api/v1.
        #[arg(long)]
        base_url: Option<String>,

        /// n8n API key.
        #[arg(long)]
        api_key: Option<String>,

        /// Use live data.
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Use demo data.
        #[arg(long)]
        disable: bool,
    },
    /// Test the stored connection against GET /workflows.
    Test,
}

impl SettingsCommand {
    pub async fn execute(self, service: Arc<DataService>) -> Result<()> {
        match self.action {
            SettingsAction::Show { json } => {
                let settings = service.settings().redacted();
                if json {
                    output::print_json(&settings)?;
                } else {
                    print_settings(&settings);
                }
            }
            SettingsAction::Set {
                base_url,
                api_key,
                enable,
                disable,
            } => {
                let settings = merge(service.settings(), base_url, api_key, enable, disable);
                service.save_settings(&settings)?;
                println!("  {} Settings saved", style("✓").green().bold());
                print_settings(&settings.redacted());
            }
            SettingsAction::Test => {
                let settings = service.settings();
                if settings.base_url.is_empty() || settings.api_key.is_empty() {
                    bail!("Please set both --base-url and --api-key before testing");
                }
                match service.test_connection(&settings).await {
                    Ok(()) => println!(
                        "  {} Connection to {} succeeded",
                        style("✓").green().bold(),
                        settings.base_url
                    ),
                    Err(e) => bail!("Connection failed: {}", e),
                }
            }
        }
        Ok(())
    }
}

fn merge(
    mut current: N8nSettings,
    base_url: Option<String>,
    api_key: Option<String>,
    enable: bool,
    disable: bool,
) -> N8nSettings {
    if let Some(base_url) = base_url {
        current.base_url = base_url;
    }
    if let Some(api_key) = api_key {
        current.api_key = api_key;
    }
    if enable {
        current.enabled = true;
    } else if disable {
        current.enabled = false;
    }
    current
}

fn print_settings(settings: &N8nSettings) {
    let or_unset = |value: &str| {
        if value.is_empty() {
            style("(unset)".to_string()).dim()
        } else {
            style(value.to_string())
        }
    };
    println!("  Base URL  {}", or_unset(&settings.base_url));
    println!("  API key   {}", or_unset(&settings.api_key));
    println!(
        "  Enabled   {}",
        if settings.enabled {
            style("yes").green()
        } else {
            style("no").yellow()
        }
    );
    println!(
        "  Mode      {}",
        if settings.is_configured() { "live" } else { "demo" }
    );
}
