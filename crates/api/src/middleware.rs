use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use auth::{Role, User};

use crate::error::ApiError;
use crate::AppState;

/// Extract and validate the bearer token from the Authorization header.
///
/// Any failure (missing header, bad signature, expired token, vanished
/// account) is a single Unauthorized outcome; the reason is only logged.
pub async fn extract_user_from_token(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, ApiError> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Missing or invalid Authorization header".to_string()))?;

    state.auth.authenticate(token).await.map_err(|e| {
        tracing::debug!(error = %e, "token rejected");
        e.into()
    })
}

/// Require a valid token; any authenticated role passes.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = extract_user_from_token(&state, request.headers()).await?;

    // Make the user available to handlers downstream.
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Require a valid token whose account holds the admin role.
///
/// A valid identity without the right is Forbidden, not Unauthorized.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = extract_user_from_token(&state, request.headers()).await?;

    if !user.role.grants(Role::Admin) {
        return Err(ApiError::Forbidden(
            "Admin privileges required".to_string(),
        ));
    }

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extractor for the authenticated user.
/// Use in handlers behind `require_auth` or `require_admin`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
    }
}
