use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use auth::AuthError;
use catalog::CatalogError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Boundary error: every core error maps here, and from here to a fixed
/// status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Duplicate registration is a 400, matching the HTTP contract.
            AuthError::EmailTaken => Self::BadRequest(err.to_string()),
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            // Expired and invalid tokens are indistinguishable to callers.
            AuthError::TokenExpired | AuthError::InvalidToken => {
                Self::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::HashingError(_)
            | AuthError::MalformedHash
            | AuthError::TokenGenerationError(_)
            | AuthError::Database(_) => {
                tracing::error!(error = %err, "auth failure");
                Self::Internal
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => Self::NotFound(err.to_string()),
            CatalogError::Invalid { .. }
            | CatalogError::InvalidQuantity
            | CatalogError::OutOfStock
            | CatalogError::InsufficientStock { .. } => Self::BadRequest(err.to_string()),
            CatalogError::Database(_) => {
                tracing::error!(error = %err, "catalog failure");
                Self::Internal
            }
        }
    }
}
