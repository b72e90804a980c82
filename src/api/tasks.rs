use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::Response,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::auth::AuthUser;
use super::{ApiError, envelope_response};
use crate::models::task::{NewTask, TaskPatch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,

    pub description: Option<String>,

    /// yyyy-MM-dd or ISO 8601 datetime
    pub due_date: Option<String>,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_status() -> String {
    "Pending".to_string()
}

fn default_priority() -> String {
    "High".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default = "default_page_number")]
    pub page_number: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u64,

    pub status: Option<String>,

    pub priority: Option<String>,

    /// yyyy-MM-dd or ISO 8601 datetime; matches on the calendar day
    pub due_date: Option<String>,
}

const fn default_page_number() -> u64 {
    1
}

const fn default_page_size() -> u64 {
    10
}

/// Accepts a bare date or an ISO 8601 datetime, normalized to UTC. A bare
/// date resolves to midnight.
fn parse_due_date(input: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }

    Err(ApiError::validation(
        "Invalid dueDate format. Expected format: yyyy-MM-dd or yyyy-MM-ddTHH:mm:ssZ (ISO 8601).",
    ))
}

fn parse_optional_due_date(input: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    input
        .filter(|s| !s.trim().is_empty())
        .map(parse_due_date)
        .transpose()
}

/// POST /tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Response, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required."));
    }

    let due_date = parse_optional_due_date(payload.due_date.as_deref())?;

    let result = state
        .task_service
        .create_task(
            user.id,
            NewTask {
                title: payload.title,
                description: payload.description,
                due_date,
                status: payload.status,
                priority: payload.priority,
            },
        )
        .await;

    Ok(envelope_response(result))
}

/// GET /tasks
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Response, ApiError> {
    let due_date = parse_optional_due_date(query.due_date.as_deref())?;

    let result = state
        .task_service
        .list_tasks(
            user.id,
            query.page_number,
            query.page_size,
            due_date,
            query.status,
            query.priority,
        )
        .await;

    Ok(envelope_response(result))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Response {
    let result = state.task_service.get_task(id, user.id).await;

    envelope_response(result)
}

/// PUT /tasks/{id}
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Response, ApiError> {
    let due_date = parse_optional_due_date(payload.due_date.as_deref())?;

    let result = state
        .task_service
        .update_task(
            id,
            user.id,
            TaskPatch {
                title: payload.title,
                description: payload.description,
                due_date,
                status: payload.status,
                priority: payload.priority,
            },
        )
        .await;

    Ok(envelope_response(result))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Response {
    let result = state.task_service.delete_task(id, user.id).await;

    envelope_response(result)
}
