//! Response shapes of the n8n public REST API.

use std::fmt;

use serde::Deserialize;

/// List payload, either paged (`{"data": [...]}`) or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RemoteList<T> {
    Paged { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> RemoteList<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            RemoteList::Paged { data } => data,
            RemoteList::Bare(items) => items,
        }
    }
}

/// n8n ids are strings for workflows and numbers for executions on some
/// versions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Text(id) => f.write_str(id),
            RemoteId::Number(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWorkflow {
    pub id: RemoteId,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<RemoteTag>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteTag {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExecution {
    pub id: RemoteId,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub stopped_at: Option<String>,
    #[serde(default)]
    pub workflow_id: Option<RemoteId>,
    #[serde(default)]
    pub workflow_data: Option<RemoteWorkflowData>,
    #[serde(default)]
    pub data: Option<RemoteExecutionData>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteWorkflowData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExecutionData {
    #[serde(default)]
    pub result_data: Option<RemoteResultData>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteResultData {
    #[serde(default)]
    pub error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteExecution {
    /// Error message reported by n8n, if the execution carried result data.
    pub fn error_message(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .result_data
            .as_ref()?
            .error
            .as_ref()?
            .message
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_and_bare_lists() {
        let paged: RemoteList<RemoteTag> =
            serde_json::from_str(r#"{"data": [{"name": "a"}], "nextCursor": null}"#).unwrap();
        assert_eq!(paged.into_items().len(), 1);

        let bare: RemoteList<RemoteTag> =
            serde_json::from_str(r#"[{"name": "a"}, {"name": "b"}]"#).unwrap();
        assert_eq!(bare.into_items().len(), 2);
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let numeric: RemoteId = serde_json::from_str("42").unwrap();
        let text: RemoteId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(numeric.to_string(), "42");
        assert_eq!(text.to_string(), "abc");
    }

    #[test]
    fn test_execution_error_message() {
        let execution: RemoteExecution = serde_json::from_value(serde_json::json!({
            "id": 7,
            "finished": false,
            "stoppedAt": "2024-06-28T14:25:22.000Z",
            "data": {"resultData": {"error": {"message": "Timeout"}}}
        }))
        .unwrap();
        assert_eq!(execution.error_message(), Some("Timeout"));
    }
}
