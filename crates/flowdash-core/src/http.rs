//! Outbound HTTP seam used by the live data path.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;

use crate::error::{FlowdashError, Result};

/// HTTP methods used against the n8n API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response as seen by the data layer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase for the status.
    pub status_text: String,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Create a response, deriving the reason phrase from the status code.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: canonical_reason(status).to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into a remote rejection.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FlowdashError::Remote {
                status: self.status,
                status_text: self.status_text,
            })
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| FlowdashError::Deserialization(e.to_string()))
    }
}

/// Reason phrase for a status code, empty when unknown.
pub fn canonical_reason(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

/// Something that can carry an [`HttpRequest`] to a server.
///
/// Failing to reach the server is a `Transport` error; any status code,
/// including non-2xx, is returned as a response.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: HttpRequest)
        -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + '_>>;
}
