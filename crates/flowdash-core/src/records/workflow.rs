use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowdashError;

/// Workflow lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Active,
    Paused,
    Error,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Active => "active",
            WorkflowStatus::Paused => "paused",
            WorkflowStatus::Error => "error",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = FlowdashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(WorkflowStatus::Active),
            "paused" => Ok(WorkflowStatus::Paused),
            "error" => Ok(WorkflowStatus::Error),
            other => Err(FlowdashError::InvalidArgument(format!(
                "unknown workflow status '{}'",
                other
            ))),
        }
    }
}

/// A named automation definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: WorkflowStatus,
    pub assigned_clients: u32,
    /// Human-readable, e.g. "2 hours ago".
    pub last_execution: String,
    pub execution_count: u64,
    pub tags: Vec<String>,
    pub created_at: String,
}
