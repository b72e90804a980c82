use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
mod error;
mod tasks;
mod users;

pub use error::ApiError;

use crate::config::Config;
use crate::services::OpResult;
use crate::state::AppState;

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    AppState::from_config(config).await
}

/// Renders a service envelope as the response body, reusing its code as the
/// literal HTTP status.
pub(crate) fn envelope_response<T: Serialize>(result: OpResult<T>) -> Response {
    let status =
        StatusCode::from_u16(result.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let protected_routes = Router::new()
        .route("/tasks", post(tasks::create_task))
        .route("/tasks", get(tasks::list_tasks))
        .route("/tasks/{id}", get(tasks::get_task))
        .route("/tasks/{id}", put(tasks::update_task))
        .route("/tasks/{id}", delete(tasks::delete_task))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(protected_routes)
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
