//! Client for the n8n public REST API.

mod mapping;
mod types;

pub use mapping::{derive_status, format_duration, map_execution, map_workflow};
pub use types::{RemoteExecution, RemoteId, RemoteList, RemoteWorkflow};

use std::sync::Arc;

use flowdash_core::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use flowdash_core::records::{Execution, Workflow};
use flowdash_core::{N8nSettings, Result};
use serde_json::json;

/// Header carrying the n8n API key.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// One-shot client bound to a set of connection settings.
///
/// Every call is attempted exactly once; nothing is cached.
#[derive(Clone)]
pub struct N8nClient {
    base_url: String,
    api_key: String,
    transport: Arc<dyn HttpTransport>,
}

impl N8nClient {
    pub fn new(settings: &N8nSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request to `{base_url}{endpoint}`, failing on non-2xx.
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(method, format!("{}{}", self.base_url, endpoint))
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        self.transport.send(request).await?.error_for_status()
    }

    pub async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        let response = self.request(HttpMethod::Get, "/workflows", None).await?;
        let list: RemoteList<RemoteWorkflow> = response.json()?;
        Ok(list.into_items().into_iter().map(map_workflow).collect())
    }

    pub async fn list_executions(&self) -> Result<Vec<Execution>> {
        let response = self.request(HttpMethod::Get, "/executions", None).await?;
        let list: RemoteList<RemoteExecution> = response.json()?;
        Ok(list.into_items().into_iter().map(map_execution).collect())
    }

    pub async fn delete_workflow(&self, id: &str) -> Result<()> {
        self.request(HttpMethod::Delete, &format!("/workflows/{}", id), None)
            .await?;
        Ok(())
    }

    /// Trigger a workflow by activating it.
    pub async fn activate_workflow(&self, id: &str) -> Result<()> {
        self.request(
            HttpMethod::Post,
            &format!("/workflows/{}/activate", id),
            Some(json!({})),
        )
        .await?;
        Ok(())
    }

    /// Pause a workflow by posting `{"active": false}` to its activate endpoint.
    pub async fn deactivate_workflow(&self, id: &str) -> Result<()> {
        self.request(
            HttpMethod::Post,
            &format!("/workflows/{}/activate", id),
            Some(json!({ "active": false })),
        )
        .await?;
        Ok(())
    }

    pub async fn stop_execution(&self, id: &str) -> Result<()> {
        self.request(HttpMethod::Post, &format!("/executions/{}/stop", id), None)
            .await?;
        Ok(())
    }

    /// Check that the instance answers `GET /workflows` with a 2xx.
    pub async fn ping(&self) -> Result<()> {
        self.request(HttpMethod::Get, "/workflows", None).await?;
        Ok(())
    }
}
