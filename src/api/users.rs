use axum::{Json, extract::State, response::Response};
use serde::Deserialize;
use std::sync::Arc;

use super::envelope_response;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Username or email
    pub identifier: String,
    pub password: String,
}

/// POST /users/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    let result = state
        .auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await;

    envelope_response(result)
}

/// POST /users/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let result = state
        .auth_service
        .authenticate(&payload.identifier, &payload.password)
        .await;

    envelope_response(result)
}
