use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console::style;
use flowdash_core::records::{ExecutionFilter, UserFilter, WorkflowFilter};
use flowdash_runtime::{DataMode, DataService};

use super::output;

/// Search and output flags shared by list commands.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive search term.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

fn print_mode_banner(service: &DataService, json: bool) {
    if json {
        return;
    }
    if service.mode() == DataMode::Demo {
        eprintln!("  {}", style("(demo data)").yellow().dim());
    }
}

fn done(action: &str, id: &str) {
    println!("  {} {} {}", style("✓").green().bold(), action, style(id).bold());
}

/// Workflow commands.
#[derive(Parser)]
pub struct WorkflowsCommand {
    #[command(subcommand)]
    pub action: WorkflowAction,
}

#[derive(Subcommand)]
pub enum WorkflowAction {
    /// List workflows.
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Status selector: active, paused, error or all.
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a workflow.
    Delete { id: String },
    /// Execute (activate) a workflow.
    Execute { id: String },
    /// Pause a workflow.
    Pause { id: String },
}

impl WorkflowsCommand {
    pub async fn execute(self, service: Arc<DataService>) -> Result<()> {
        match self.action {
            WorkflowAction::List { list, status } => {
                let filter = WorkflowFilter::parse(list.search.as_deref(), status.as_deref())?;
                let workflows = filter.apply(service.get_workflows().await);
                print_mode_banner(&service, list.json);
                if list.json {
                    output::print_json(&workflows)?;
                } else {
                    output::print_workflows(&workflows);
                }
            }
            WorkflowAction::Delete { id } => {
                service.delete_workflow(&id).await?;
                done("Deleted workflow", &id);
            }
            WorkflowAction::Execute { id } => {
                service.execute_workflow(&id).await?;
                done("Executed workflow", &id);
            }
            WorkflowAction::Pause { id } => {
                service.pause_workflow(&id).await?;
                done("Paused workflow", &id);
            }
        }
        Ok(())
    }
}

/// Execution commands.
#[derive(Parser)]
pub struct ExecutionsCommand {
    #[command(subcommand)]
    pub action: ExecutionAction,
}

#[derive(Subcommand)]
pub enum ExecutionAction {
    /// List executions.
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Status selector: success, running, error, queued or all.
        #[arg(long)]
        status: Option<String>,
    },
    /// Stop a running execution.
    Stop { id: String },
}

impl ExecutionsCommand {
    pub async fn execute(self, service: Arc<DataService>) -> Result<()> {
        match self.action {
            ExecutionAction::List { list, status } => {
                let filter = ExecutionFilter::parse(list.search.as_deref(), status.as_deref())?;
                let executions = filter.apply(service.get_executions().await);
                print_mode_banner(&service, list.json);
                if list.json {
                    output::print_json(&executions)?;
                } else {
                    output::print_executions(&executions);
                }
            }
            ExecutionAction::Stop { id } => {
                service.stop_execution(&id).await?;
                done("Stopped execution", &id);
            }
        }
        Ok(())
    }
}

/// User commands.
#[derive(Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List users.
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Role selector: admin, editor, viewer or all.
        #[arg(long)]
        role: Option<String>,
    },
    /// Remove a user.
    Delete { id: String },
}

impl UsersCommand {
    pub async fn execute(self, service: Arc<DataService>) -> Result<()> {
        match self.action {
            UserAction::List { list, role } => {
                let filter = UserFilter::parse(list.search.as_deref(), role.as_deref())?;
                let users = filter.apply(service.get_users().await);
                if list.json {
                    output::print_json(&users)?;
                } else {
                    output::print_users(&users);
                }
            }
            UserAction::Delete { id } => {
                service.delete_user(&id).await;
                done("Deleted user", &id);
            }
        }
        Ok(())
    }
}

/// Show aggregate stats.
#[derive(Parser)]
pub struct StatsCommand {
    /// Print JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(self, service: Arc<DataService>) -> Result<()> {
        let stats = service.get_stats().await;
        print_mode_banner(&service, self.json);
        if self.json {
            output::print_json(&stats)?;
        } else {
            output::print_stats(&stats);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdash_core::{MemorySettingsStore, N8nSettings};
    use flowdash_runtime::ReqwestTransport;

    fn demo_service() -> Arc<DataService> {
        Arc::new(DataService::new(
            Arc::new(MemorySettingsStore::with_settings(N8nSettings::default())),
            Arc::new(ReqwestTransport::new()),
        ))
    }

    #[tokio::test]
    async fn test_pause_command_updates_demo_store() {
        let service = demo_service();
        let cmd = WorkflowsCommand {
            action: WorkflowAction::Pause {
                id: "wf_001".into(),
            },
        };
        cmd.execute(Arc::clone(&service)).await.unwrap();

        let workflows = service.get_workflows().await;
        assert_eq!(
            workflows[0].status,
            flowdash_core::records::WorkflowStatus::Paused
        );
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_status() {
        let cmd = ExecutionsCommand {
            action: ExecutionAction::List {
                list: ListArgs {
                    search: None,
                    json: true,
                },
                status: Some("finished".into()),
            },
        };
        assert!(cmd.execute(demo_service()).await.is_err());
    }
}
