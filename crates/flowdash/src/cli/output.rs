use anyhow::Result;
use console::{style, StyledObject};
use flowdash_core::records::{
    Execution, ExecutionStatus, Stats, User, UserRole, Workflow, WorkflowStatus,
};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn workflow_badge(status: WorkflowStatus) -> StyledObject<&'static str> {
    let label = style(status.as_str());
    match status {
        WorkflowStatus::Active => label.green(),
        WorkflowStatus::Paused => label.yellow(),
        WorkflowStatus::Error => label.red(),
    }
}

pub fn execution_badge(status: ExecutionStatus) -> StyledObject<&'static str> {
    let label = style(status.as_str());
    match status {
        ExecutionStatus::Success => label.green(),
        ExecutionStatus::Running => label.blue(),
        ExecutionStatus::Error => label.red(),
        ExecutionStatus::Queued => label.yellow(),
    }
}

pub fn role_badge(role: UserRole) -> StyledObject<&'static str> {
    let label = style(role.as_str());
    match role {
        UserRole::Admin => label.magenta(),
        UserRole::Editor => label.cyan(),
        UserRole::Viewer => label.dim(),
    }
}

pub fn print_workflows(workflows: &[Workflow]) {
    if workflows.is_empty() {
        println!("  No workflows found.");
        return;
    }
    for workflow in workflows {
        println!(
            "  {:<8} {:<32} {:<8} clients={:<3} runs={:<6} last={}",
            workflow.id,
            workflow.name,
            workflow_badge(workflow.status),
            workflow.assigned_clients,
            workflow.execution_count,
            workflow.last_execution,
        );
        if !workflow.tags.is_empty() {
            println!("           {}", style(workflow.tags.join(", ")).dim());
        }
    }
}

pub fn print_executions(executions: &[Execution]) {
    if executions.is_empty() {
        println!("  No executions found.");
        return;
    }
    for execution in executions {
        println!(
            "  {:<9} {:<32} {:<8} {:>3}% ({}/{}) {}",
            execution.id,
            execution.workflow_name,
            execution_badge(execution.status),
            execution.progress_percent(),
            execution.completed_steps,
            execution.steps,
            execution.duration.as_deref().unwrap_or("-"),
        );
        if let Some(message) = &execution.error_message {
            println!("            {}", style(message).red());
        }
    }
}

pub fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("  No users found.");
        return;
    }
    for user in users {
        let mfa = if user.mfa_enabled { "mfa" } else { "" };
        println!(
            "  {:<9} {:<18} {:<30} {:<7} {:<16} {:<8} {}",
            user.id,
            user.name,
            user.email,
            role_badge(user.role),
            user.company,
            user.status,
            mfa,
        );
    }
}

pub fn print_stats(stats: &Stats) {
    println!("  Workflows          {}", style(stats.total_workflows).bold());
    println!("  Active executions  {}", style(stats.active_executions).bold());
    println!("  Users              {}", style(stats.total_users).bold());
    println!("  Success rate       {}%", style(stats.success_rate).bold());
}
