use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use flowdash_core::records::{
    Execution, ExecutionFilter, Stats, User, UserFilter, Workflow, WorkflowFilter,
};
use flowdash_core::{FlowdashError, N8nSettings};
use serde::{Deserialize, Serialize};

use super::DashboardState;
use crate::service::DataMode;

/// Query parameters for workflow and execution lists.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive search term.
    pub search: Option<String>,
    /// Status selector, or "all".
    pub status: Option<String>,
}

/// Query parameters for user lists.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub search: Option<String>,
    /// Role selector, or "all".
    pub role: Option<String>,
}

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(data: T) -> ApiResult<T> {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

fn fail<T>(err: FlowdashError) -> ApiResult<T> {
    let status = if err.is_remote_failure() {
        StatusCode::BAD_GATEWAY
    } else {
        match &err {
            FlowdashError::InvalidArgument(_) | FlowdashError::Config(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

fn respond<T>(result: flowdash_core::Result<T>) -> ApiResult<T> {
    match result {
        Ok(data) => ok(data),
        Err(e) => fail(e),
    }
}

pub async fn get_mode(State(state): State<DashboardState>) -> ApiResult<DataMode> {
    ok(state.service.mode())
}

// ============================================================================
// Workflows API
// ============================================================================

pub async fn list_workflows(
    State(state): State<DashboardState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Workflow>> {
    let filter = match WorkflowFilter::parse(query.search.as_deref(), query.status.as_deref()) {
        Ok(filter) => filter,
        Err(e) => return fail(e),
    };
    ok(filter.apply(state.service.get_workflows().await))
}

pub async fn delete_workflow(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    respond(state.service.delete_workflow(&id).await.map(|()| id))
}

pub async fn execute_workflow(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    respond(state.service.execute_workflow(&id).await.map(|()| id))
}

pub async fn pause_workflow(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    respond(state.service.pause_workflow(&id).await.map(|()| id))
}

// ============================================================================
// Executions API
// ============================================================================

pub async fn list_executions(
    State(state): State<DashboardState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Execution>> {
    let filter = match ExecutionFilter::parse(query.search.as_deref(), query.status.as_deref()) {
        Ok(filter) => filter,
        Err(e) => return fail(e),
    };
    ok(filter.apply(state.service.get_executions().await))
}

pub async fn stop_execution(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    respond(state.service.stop_execution(&id).await.map(|()| id))
}

// ============================================================================
// Users API
// ============================================================================

pub async fn list_users(
    State(state): State<DashboardState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Vec<User>> {
    let filter = match UserFilter::parse(query.search.as_deref(), query.role.as_deref()) {
        Ok(filter) => filter,
        Err(e) => return fail(e),
    };
    ok(filter.apply(state.service.get_users().await))
}

pub async fn delete_user(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    state.service.delete_user(&id).await;
    ok(id)
}

// ============================================================================
// Stats API
// ============================================================================

pub async fn get_stats(State(state): State<DashboardState>) -> ApiResult<Stats> {
    ok(state.service.get_stats().await)
}

// ============================================================================
// Settings API
// ============================================================================

/// Stored settings with the API key masked.
pub async fn get_settings(State(state): State<DashboardState>) -> ApiResult<N8nSettings> {
    ok(state.service.settings().redacted())
}

pub async fn update_settings(
    State(state): State<DashboardState>,
    Json(submitted): Json<N8nSettings>,
) -> ApiResult<N8nSettings> {
    let settings = unmask_api_key(&state, submitted);
    respond(
        state
            .service
            .save_settings(&settings)
            .map(|()| settings.redacted()),
    )
}

pub async fn test_settings(
    State(state): State<DashboardState>,
    Json(submitted): Json<N8nSettings>,
) -> ApiResult<bool> {
    let candidate = unmask_api_key(&state, submitted);
    respond(state.service.test_connection(&candidate).await.map(|()| true))
}

/// A form that echoes back the masked key means "keep the stored key".
fn unmask_api_key(state: &DashboardState, mut submitted: N8nSettings) -> N8nSettings {
    let stored = state.service.settings();
    if !stored.api_key.is_empty() && submitted.api_key == stored.redacted().api_key {
        submitted.api_key = stored.api_key;
    }
    submitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let (status, _) = fail::<()>(FlowdashError::InvalidArgument("bad".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) = fail::<()>(FlowdashError::Transport("refused".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Transport error: refused"));

        let (status, _) = fail::<()>(FlowdashError::Remote {
            status: 404,
            status_text: "Not Found".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = fail::<()>(FlowdashError::Deserialization("<html>".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = fail::<()>(FlowdashError::Config("missing api key".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = fail::<()>(FlowdashError::Serialization("bad".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
