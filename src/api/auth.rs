use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use super::ApiError;
use crate::entities::users;
use crate::state::AppState;

/// Authenticated user attached to the request by [`auth_middleware`].
#[derive(Clone)]
pub struct AuthUser(pub users::Model);

/// Authorization middleware for task routes. Validates the bearer token and
/// reloads the user behind the `sub` claim, so a token for a deleted account
/// stops working immediately.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        extract_bearer_token(&headers).ok_or_else(|| ApiError::unauthorized("Missing token"))?;

    let claims = state
        .token_issuer
        .verify(&token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("Invalid token subject"))?;

    let user = state
        .store
        .get_user_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to load user: {e}")))?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;

    tracing::Span::current().record("user_id", user.id.to_string());

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}
