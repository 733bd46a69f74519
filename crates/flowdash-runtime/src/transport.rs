use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use flowdash_core::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use flowdash_core::{FlowdashError, Result};
use tracing::debug;

/// [`HttpTransport`] backed by a reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with no request timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with an optional per-request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FlowdashError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + '_>> {
        Box::pin(async move {
            debug!(method = %request.method, url = %request.url, "Sending n8n request");

            let mut builder = self
                .client
                .request(to_reqwest_method(request.method), &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.to_string());
            }

            let response = builder
                .send()
                .await
                .map_err(|e| FlowdashError::Transport(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| FlowdashError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            })
        })
    }
}
