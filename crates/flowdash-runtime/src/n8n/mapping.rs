//! Mapping from n8n response shapes to dashboard records.

use chrono::{DateTime, FixedOffset};
use flowdash_core::records::{Execution, ExecutionStatus, Workflow, WorkflowStatus};

use super::types::{RemoteExecution, RemoteWorkflow};

const NO_DESCRIPTION: &str = "No description";
const NEVER_EXECUTED: &str = "Never";
const LIVE_CLIENT: &str = "n8n Instance";
const DEFAULT_TRIGGER: &str = "n8n";
const UNKNOWN_WORKFLOW: &str = "Unknown workflow";
const UNKNOWN_SIZE: &str = "N/A";
const GENERIC_FAILURE: &str = "Execution failed";

pub fn map_workflow(remote: RemoteWorkflow) -> Workflow {
    Workflow {
        id: remote.id.to_string(),
        name: remote.name,
        description: remote
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        status: if remote.active {
            WorkflowStatus::Active
        } else {
            WorkflowStatus::Paused
        },
        assigned_clients: 1,
        last_execution: remote
            .updated_at
            .unwrap_or_else(|| NEVER_EXECUTED.to_string()),
        execution_count: 0,
        tags: remote.tags.into_iter().map(|t| t.name).collect(),
        created_at: remote.created_at.map(date_only).unwrap_or_default(),
    }
}

pub fn map_execution(remote: RemoteExecution) -> Execution {
    let stopped_at = present(remote.stopped_at.as_deref());
    let started_at = present(remote.started_at.as_deref());
    let status = derive_status(remote.finished, stopped_at.is_some());

    let error_message = match status {
        ExecutionStatus::Error => Some(
            remote
                .error_message()
                .unwrap_or(GENERIC_FAILURE)
                .to_string(),
        ),
        ExecutionStatus::Success | ExecutionStatus::Running | ExecutionStatus::Queued => None,
    };

    let steps = remote
        .workflow_data
        .as_ref()
        .map_or(0, |data| data.nodes.len() as u32);
    let completed_steps = if remote.finished { steps } else { 0 };

    Execution {
        id: remote.id.to_string(),
        workflow_id: remote
            .workflow_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        workflow_name: remote
            .workflow_data
            .as_ref()
            .and_then(|data| data.name.clone())
            .unwrap_or_else(|| UNKNOWN_WORKFLOW.to_string()),
        status,
        start_time: started_at.map(str::to_string),
        end_time: stopped_at.map(str::to_string),
        duration: format_duration(started_at, stopped_at),
        client: LIVE_CLIENT.to_string(),
        triggered_by: remote
            .mode
            .clone()
            .unwrap_or_else(|| DEFAULT_TRIGGER.to_string()),
        input_size: UNKNOWN_SIZE.to_string(),
        output_size: None,
        steps,
        completed_steps,
        error_message,
    }
}

/// Classify an execution from n8n's `finished` flag and `stoppedAt` presence.
///
/// The four-way split mirrors what the dashboard has always shown; n8n's own
/// state model is richer and this is not guaranteed to be exhaustive.
pub fn derive_status(finished: bool, stopped: bool) -> ExecutionStatus {
    match (finished, stopped) {
        (false, false) => ExecutionStatus::Running,
        (true, true) => ExecutionStatus::Success,
        (false, true) => ExecutionStatus::Error,
        (true, false) => ExecutionStatus::Queued,
    }
}

/// Whole seconds between two RFC 3339 timestamps, e.g. `"12s"`.
pub fn format_duration(started_at: Option<&str>, stopped_at: Option<&str>) -> Option<String> {
    let start = parse_timestamp(started_at?)?;
    let stop = parse_timestamp(stopped_at?)?;
    let millis = (stop - start).num_milliseconds();
    let seconds = (millis as f64 / 1000.0).round() as i64;
    Some(format!("{}s", seconds))
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn date_only(value: String) -> String {
    match parse_timestamp(&value) {
        Some(timestamp) => timestamp.format("%Y-%m-%d").to_string(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn execution(value: serde_json::Value) -> Execution {
        map_execution(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_workflow_mapping_defaults() {
        let remote: RemoteWorkflow = serde_json::from_value(json!({
            "id": "abc",
            "name": "Lead intake",
            "active": false,
            "createdAt": "2024-03-05T10:11:12.000Z",
            "tags": [{"id": "1", "name": "crm"}]
        }))
        .unwrap();

        let workflow = map_workflow(remote);
        assert_eq!(workflow.id, "abc");
        assert_eq!(workflow.status, WorkflowStatus::Paused);
        assert_eq!(workflow.description, NO_DESCRIPTION);
        assert_eq!(workflow.assigned_clients, 1);
        assert_eq!(workflow.execution_count, 0);
        assert_eq!(workflow.tags, vec!["crm".to_string()]);
        assert_eq!(workflow.created_at, "2024-03-05");
        assert_eq!(workflow.last_execution, NEVER_EXECUTED);
    }

    #[test]
    fn test_active_workflow_keeps_description() {
        let remote: RemoteWorkflow = serde_json::from_value(json!({
            "id": 3,
            "name": "Sync",
            "active": true,
            "description": "Nightly sync"
        }))
        .unwrap();

        let workflow = map_workflow(remote);
        assert_eq!(workflow.id, "3");
        assert_eq!(workflow.status, WorkflowStatus::Active);
        assert_eq!(workflow.description, "Nightly sync");
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(derive_status(false, false), ExecutionStatus::Running);
        assert_eq!(derive_status(true, true), ExecutionStatus::Success);
        assert_eq!(derive_status(false, true), ExecutionStatus::Error);
        assert_eq!(derive_status(true, false), ExecutionStatus::Queued);
    }

    #[test]
    fn test_successful_execution() {
        let mapped = execution(json!({
            "id": 101,
            "finished": true,
            "mode": "manual",
            "startedAt": "2024-06-28T14:30:22.000Z",
            "stoppedAt": "2024-06-28T14:30:34.400Z",
            "workflowId": "abc",
            "workflowData": {"name": "Lead intake", "nodes": [{}, {}, {}]}
        }));

        assert_eq!(mapped.id, "101");
        assert_eq!(mapped.status, ExecutionStatus::Success);
        assert_eq!(mapped.duration.as_deref(), Some("12s"));
        assert_eq!(mapped.steps, 3);
        assert_eq!(mapped.completed_steps, 3);
        assert_eq!(mapped.workflow_name, "Lead intake");
        assert_eq!(mapped.triggered_by, "manual");
        assert_eq!(mapped.client, LIVE_CLIENT);
        assert!(mapped.error_message.is_none());
        assert!(mapped.is_consistent());
    }

    #[test]
    fn test_running_execution_has_no_duration() {
        let mapped = execution(json!({
            "id": "9",
            "finished": false,
            "startedAt": "2024-06-28T14:30:22.000Z",
            "stoppedAt": null,
            "workflowData": {"nodes": [{}, {}]}
        }));

        assert_eq!(mapped.status, ExecutionStatus::Running);
        assert!(mapped.duration.is_none());
        assert!(mapped.end_time.is_none());
        assert_eq!(mapped.steps, 2);
        assert_eq!(mapped.completed_steps, 0);
        assert_eq!(mapped.workflow_name, UNKNOWN_WORKFLOW);
        assert_eq!(mapped.triggered_by, DEFAULT_TRIGGER);
    }

    #[test]
    fn test_failed_execution_always_has_message() {
        let mapped = execution(json!({
            "id": "10",
            "finished": false,
            "startedAt": "2024-06-28T14:30:22.000Z",
            "stoppedAt": "2024-06-28T14:30:23.000Z"
        }));
        assert_eq!(mapped.status, ExecutionStatus::Error);
        assert_eq!(mapped.error_message.as_deref(), Some(GENERIC_FAILURE));
        assert!(mapped.is_consistent());
    }

    #[test]
    fn test_unparseable_timestamps_yield_no_duration() {
        assert!(format_duration(Some("yesterday"), Some("2024-06-28T14:30:23Z")).is_none());
        assert!(format_duration(None, Some("2024-06-28T14:30:23Z")).is_none());
        assert_eq!(
            format_duration(Some("2024-06-28T14:30:00Z"), Some("2024-06-28T14:31:00Z")),
            Some("60s".to_string())
        );
    }
}
