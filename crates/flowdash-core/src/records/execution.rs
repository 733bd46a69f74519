use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowdashError;

/// Error message recorded when a user stops an execution.
pub const STOPPED_BY_USER: &str = "Execution stopped by user";

/// Execution lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Running,
    Error,
    Queued,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Success => "success",
            ExecutionStatus::Running => "running",
            ExecutionStatus::Error => "error",
            ExecutionStatus::Queued => "queued",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = FlowdashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(ExecutionStatus::Success),
            "running" => Ok(ExecutionStatus::Running),
            "error" => Ok(ExecutionStatus::Error),
            "queued" => Ok(ExecutionStatus::Queued),
            other => Err(FlowdashError::InvalidArgument(format!(
                "unknown execution status '{}'",
                other
            ))),
        }
    }
}

/// One run of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    pub workflow_id: String,
    pub workflow_name: String,
    pub status: ExecutionStatus,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<String>,
    pub client: String,
    pub triggered_by: String,
    pub input_size: String,
    pub output_size: Option<String>,
    pub steps: u32,
    pub completed_steps: u32,
    /// Only set while `status` is `Error`.
    pub error_message: Option<String>,
}

impl Execution {
    /// Mark the execution as stopped by a user.
    pub fn stop(&mut self) {
        self.status = ExecutionStatus::Error;
        self.error_message = Some(STOPPED_BY_USER.to_string());
    }

    /// Fraction of steps completed, in percent.
    pub fn progress_percent(&self) -> u8 {
        if self.steps == 0 {
            return 0;
        }
        let completed = self.completed_steps.min(self.steps);
        ((completed as f64 / self.steps as f64) * 100.0).round() as u8
    }

    /// Check the record invariants: completed steps within bounds and an
    /// error message only on failed executions.
    pub fn is_consistent(&self) -> bool {
        self.completed_steps <= self.steps
            && (self.status == ExecutionStatus::Error) == self.error_message.is_some()
    }
}
