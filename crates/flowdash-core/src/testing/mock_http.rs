//! HTTP mocking utilities for testing.
//!
//! Provides a mock transport that intercepts requests and returns
//! predefined responses or simulated network failures. Every request is
//! recorded so tests can assert which calls were (or were not) made.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::error::{FlowdashError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Mock HTTP transport for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockHttp::new();
/// mock.add_mock_sync("https://n8n.test/workflows", |_| {
///     MockResponse::json(json!({"data": []}))
/// });
///
/// let response = mock.send(request).await?;
/// mock.assert_called("https://n8n.test/*");
/// ```
#[derive(Clone)]
pub struct MockHttp {
    mocks: Arc<RwLock<Vec<MockHandler>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

/// Type alias for mock handler closure.
pub type BoxedHandler = Box<dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync>;

struct MockHandler {
    method: Option<HttpMethod>,
    pattern: String,
    action: MockAction,
}

enum MockAction {
    Respond(Arc<dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync>),
    Fail(String),
}

/// A recorded request for verification.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: serde_json::Value,
}

/// Mock HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Status code.
    pub status: u16,
    /// Raw body.
    pub body: String,
}

impl MockResponse {
    /// Create a successful JSON response.
    pub fn json<T: Serialize>(body: T) -> Self {
        Self {
            status: 200,
            body: serde_json::to_string(&body).unwrap_or_default(),
        }
    }

    /// Create a response with an arbitrary raw body.
    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// Create an error response.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "message": message }).to_string(),
        }
    }

    /// Create an empty 200 OK response.
    pub fn ok() -> Self {
        Self::json(serde_json::json!({}))
    }
}

impl MockHttp {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self {
            mocks: Arc::new(RwLock::new(Vec::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a builder.
    pub fn builder() -> MockHttpBuilder {
        MockHttpBuilder::new()
    }

    /// Add a mock handler for any method.
    pub fn add_mock_sync<F>(&self, pattern: &str, handler: F)
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    {
        self.push(None, pattern, MockAction::Respond(Arc::new(handler)));
    }

    /// Add a mock handler restricted to one method.
    pub fn add_method_mock<F>(&self, method: HttpMethod, pattern: &str, handler: F)
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    {
        self.push(Some(method), pattern, MockAction::Respond(Arc::new(handler)));
    }

    /// Add a mock handler from a boxed closure.
    pub fn add_mock_boxed(&self, pattern: &str, handler: BoxedHandler) {
        self.push(None, pattern, MockAction::Respond(Arc::from(handler)));
    }

    /// Make requests matching the pattern fail as if the host were unreachable.
    pub fn fail_transport(&self, pattern: &str, message: &str) {
        self.push(None, pattern, MockAction::Fail(message.to_string()));
    }

    fn push(&self, method: Option<HttpMethod>, pattern: &str, action: MockAction) {
        let mut mocks = self.mocks.write().unwrap();
        mocks.push(MockHandler {
            method,
            pattern: pattern.to_string(),
            action,
        });
    }

    /// Execute a mock request.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let recorded = RecordedRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body: request.body.unwrap_or(serde_json::Value::Null),
        };

        self.requests.write().unwrap().push(recorded.clone());

        let mocks = self.mocks.read().unwrap();
        for mock in mocks.iter() {
            let method_matches = mock.method.map_or(true, |m| m == recorded.method);
            if method_matches && matches_pattern(&recorded.url, &mock.pattern) {
                return match &mock.action {
                    MockAction::Respond(handler) => {
                        let response = handler(&recorded);
                        Ok(HttpResponse::new(response.status, response.body))
                    }
                    MockAction::Fail(message) => Err(FlowdashError::Transport(message.clone())),
                };
            }
        }

        // No mock found
        Ok(HttpResponse::new(
            500,
            format!("No mock found for {} {}", recorded.method, recorded.url),
        ))
    }

    /// Get recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Get requests matching a pattern.
    pub fn requests_to(&self, pattern: &str) -> Vec<RecordedRequest> {
        self.requests
            .read()
            .unwrap()
            .iter()
            .filter(|r| matches_pattern(&r.url, pattern))
            .cloned()
            .collect()
    }

    // =========================================================================
    // VERIFICATION METHODS
    // =========================================================================

    /// Assert that a URL pattern was called.
    pub fn assert_called(&self, pattern: &str) {
        let requests = self.requests();
        let matching = requests
            .iter()
            .filter(|r| matches_pattern(&r.url, pattern))
            .count();
        assert!(
            matching > 0,
            "Expected HTTP call matching '{}', but none found. Recorded requests: {:?}",
            pattern,
            requests.iter().map(|r| &r.url).collect::<Vec<_>>()
        );
    }

    /// Assert that a URL pattern was called a specific number of times.
    pub fn assert_called_times(&self, pattern: &str, expected: usize) {
        let matching = self.requests_to(pattern).len();
        assert_eq!(
            matching, expected,
            "Expected {} HTTP calls matching '{}', but found {}",
            expected, pattern, matching
        );
    }

    /// Assert that a URL pattern was not called.
    pub fn assert_not_called(&self, pattern: &str) {
        let matching = self.requests_to(pattern).len();
        assert_eq!(
            matching, 0,
            "Expected no HTTP calls matching '{}', but found {}",
            pattern, matching
        );
    }

    /// Assert that no request was made at all.
    pub fn assert_no_requests(&self) {
        let requests = self.requests();
        assert!(
            requests.is_empty(),
            "Expected no HTTP calls, but found {:?}",
            requests
                .iter()
                .map(|r| format!("{} {}", r.method, r.url))
                .collect::<Vec<_>>()
        );
    }

    /// Assert that a request was made with specific body content.
    pub fn assert_called_with_body<F>(&self, pattern: &str, predicate: F)
    where
        F: Fn(&serde_json::Value) -> bool,
    {
        let matching = self
            .requests_to(pattern)
            .iter()
            .filter(|r| predicate(&r.body))
            .count();
        assert!(
            matching > 0,
            "Expected HTTP call matching '{}' with matching body, but none found",
            pattern
        );
    }
}

impl Default for MockHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for MockHttp {
    fn send(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + '_>> {
        Box::pin(self.execute(request))
    }
}

/// Check if a URL matches a glob-style pattern where `*` matches any run.
fn matches_pattern(url: &str, pattern: &str) -> bool {
    let pattern_parts: Vec<&str> = pattern.split('*').collect();
    if pattern_parts.len() == 1 {
        return url == pattern;
    }

    let mut remaining = url;
    for (i, part) in pattern_parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }

        if i == 0 {
            if !remaining.starts_with(part) {
                return false;
            }
            remaining = &remaining[part.len()..];
        } else if i == pattern_parts.len() - 1 {
            if !remaining.ends_with(part) {
                return false;
            }
        } else if let Some(pos) = remaining.find(part) {
            remaining = &remaining[pos + part.len()..];
        } else {
            return false;
        }
    }

    true
}

/// Builder for MockHttp.
pub struct MockHttpBuilder {
    mocks: Vec<(String, BoxedHandler)>,
    failures: Vec<(String, String)>,
}

impl MockHttpBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            mocks: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Add a mock with a custom handler.
    pub fn mock<F>(mut self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    {
        self.mocks.push((pattern.to_string(), Box::new(handler)));
        self
    }

    /// Add a mock that returns a JSON response.
    pub fn mock_json<T: Serialize + Clone + Send + Sync + 'static>(
        self,
        pattern: &str,
        response: T,
    ) -> Self {
        self.mock(pattern, move |_| MockResponse::json(response.clone()))
    }

    /// Add a mock that answers with the given status.
    pub fn mock_status(self, pattern: &str, status: u16) -> Self {
        self.mock(pattern, move |_| {
            MockResponse::error(status, crate::http::canonical_reason(status))
        })
    }

    /// Add a simulated network failure.
    pub fn fail_transport(mut self, pattern: &str, message: &str) -> Self {
        self.failures.push((pattern.to_string(), message.to_string()));
        self
    }

    /// Build the MockHttp.
    pub fn build(self) -> MockHttp {
        let mock = MockHttp::new();
        for (pattern, message) in self.failures {
            mock.fail_transport(&pattern, &message);
        }
        for (pattern, handler) in self.mocks {
            mock.add_mock_boxed(&pattern, handler);
        }
        mock
    }
}

impl Default for MockHttpBuilder {
    fn default() -> Self {
        Self::new()
    }
}
