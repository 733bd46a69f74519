mod api;

pub use api::ApiResponse;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::DataService;

/// Dashboard state shared across handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub service: Arc<DataService>,
}

impl DashboardState {
    pub fn new(service: Arc<DataService>) -> Self {
        Self { service }
    }
}

/// Create the JSON API router over the data service.
pub fn create_api_router(state: DashboardState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mode", get(api::get_mode))
        // Workflows API
        .route("/workflows", get(api::list_workflows))
        .route("/workflows/{id}", delete(api::delete_workflow))
        .route("/workflows/{id}/execute", post(api::execute_workflow))
        .route("/workflows/{id}/pause", post(api::pause_workflow))
        // Executions API
        .route("/executions", get(api::list_executions))
        .route("/executions/{id}/stop", post(api::stop_execution))
        // Users API
        .route("/users", get(api::list_users))
        .route("/users/{id}", delete(api::delete_user))
        // Stats API
        .route("/stats", get(api::get_stats))
        // Settings API
        .route(
            "/settings",
            get(api::get_settings).put(api::update_settings),
        )
        .route("/settings/test", post(api::test_settings))
        .layer(cors)
        .with_state(state)
}

/// Create the full application with the API nested under `api_prefix`.
pub fn create_app(state: DashboardState, api_prefix: &str) -> Router {
    Router::new()
        .nest(api_prefix, create_api_router(state))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use flowdash_core::testing::{MockHttp, MockResponse};
    use flowdash_core::{MemorySettingsStore, N8nSettings};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(settings: N8nSettings, mock: &MockHttp) -> Router {
        let service = DataService::new(
            Arc::new(MemorySettingsStore::with_settings(settings)),
            Arc::new(mock.clone()),
        );
        create_app(DashboardState::new(Arc::new(service)), "/_api")
    }

    fn demo_app() -> Router {
        app_with(N8nSettings::default(), &MockHttp::new())
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_list_workflows_with_filters() {
        let app = demo_app();

        let (status, body) = call(&app, "GET", "/_api/workflows", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);

        let (_, body) = call(&app, "GET", "/_api/workflows?status=paused", None).await;
        assert_eq!(body["data"][0]["id"], "wf_003");

        let (_, body) = call(&app, "GET", "/_api/workflows?search=EMAIL&status=all", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["assignedClients"], 12);
    }

    #[tokio::test]
    async fn test_invalid_filter_is_bad_request() {
        let app = demo_app();
        let (status, body) = call(&app, "GET", "/_api/executions?status=done", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_demo_mutations_round_trip() {
        let app = demo_app();

        let (status, _) = call(&app, "DELETE", "/_api/workflows/wf_002", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, "POST", "/_api/executions/exec_002/stop", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, stats) = call(&app, "GET", "/_api/stats", None).await;
        assert_eq!(stats["data"]["totalWorkflows"], 3);
        assert_eq!(stats["data"]["activeExecutions"], 0);
        assert_eq!(stats["data"]["successRate"], 94.2);
    }

    #[tokio::test]
    async fn test_user_endpoints() {
        let app = demo_app();

        let (_, body) = call(&app, "GET", "/_api/users?role=viewer", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        call(&app, "DELETE", "/_api/users/user_003", None).await;
        let (_, body) = call(&app, "GET", "/_api/users?role=viewer", None).await;
        assert_eq!(body["data"][0]["id"], "user_005");
    }

    #[tokio::test]
    async fn test_failed_live_mutation_is_bad_gateway() {
        let mock = MockHttp::builder().mock_status("https://x/*", 500).build();
        let app = app_with(N8nSettings::new("https://x", "k"), &mock);

        let (status, body) = call(&app, "POST", "/_api/workflows/wf_001/pause", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "n8n API error: 500 Internal Server Error");

        // Reads still succeed with demo data.
        let (status, body) = call(&app, "GET", "/_api/workflows", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["status"], "active");
    }

    #[tokio::test]
    async fn test_settings_round_trip_masks_key() {
        let mock = MockHttp::new();
        mock.add_mock_sync("https://n8n.test/*", |_| MockResponse::json(json!({"data": []})));
        let app = app_with(N8nSettings::default(), &mock);

        let (_, mode) = call(&app, "GET", "/_api/mode", None).await;
        assert_eq!(mode["data"], "demo");

        let settings = json!({"baseUrl": "https://n8n.test", "apiKey": "secret-abcd", "enabled": true});
        let (status, _) = call(&app, "PUT", "/_api/settings", Some(settings)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = call(&app, "GET", "/_api/settings", None).await;
        assert_eq!(body["data"]["apiKey"], "****abcd");
        assert_eq!(body["data"]["enabled"], true);

        // Re-submitting the masked key keeps the stored one.
        let masked = json!({"baseUrl": "https://n8n.test", "apiKey": "****abcd", "enabled": true});
        call(&app, "PUT", "/_api/settings", Some(masked)).await;
        let (_, mode) = call(&app, "GET", "/_api/mode", None).await;
        assert_eq!(mode["data"], "live");

        let (_, workflows) = call(&app, "GET", "/_api/workflows", None).await;
        assert_eq!(workflows["data"].as_array().unwrap().len(), 0);
        let requests = mock.requests_to("https://n8n.test/workflows");
        assert_eq!(requests[0].headers["X-N8N-API-KEY"], "secret-abcd");
    }

    #[tokio::test]
    async fn test_connection_endpoint() {
        let mock = MockHttp::builder().mock_status("https://x/workflows", 403).build();
        let app = app_with(N8nSettings::default(), &mock);

        let candidate = json!({"baseUrl": "https://x", "apiKey": "k", "enabled": false});
        let (status, body) = call(&app, "POST", "/_api/settings/test", Some(candidate)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "n8n API error: 403 Forbidden");

        let incomplete = json!({"baseUrl": "", "apiKey": "", "enabled": true});
        let (status, _) = call(&app, "POST", "/_api/settings/test", Some(incomplete)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
