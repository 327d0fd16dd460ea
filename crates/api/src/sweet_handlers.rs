use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use catalog::{NewSweet, Sweet, SweetPatch};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /sweets
pub async fn list_sweets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Sweet>>, ApiError> {
    Ok(Json(state.catalog.list_all().await?))
}

/// GET /sweets/search?query=
pub async fn search_sweets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Sweet>>, ApiError> {
    Ok(Json(state.catalog.search(&params.query).await?))
}

/// POST /sweets (admin)
pub async fn create_sweet(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewSweet>,
) -> Result<impl IntoResponse, ApiError> {
    let sweet = state.catalog.create(payload).await?;
    Ok((StatusCode::CREATED, Json(sweet)))
}

/// PUT /sweets/{id} (admin)
pub async fn update_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<SweetPatch>,
) -> Result<Json<Sweet>, ApiError> {
    Ok(Json(state.catalog.update(id, payload).await?))
}

/// DELETE /sweets/{id} (admin)
pub async fn delete_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.catalog.delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Sweet deleted successfully".to_string(),
    }))
}
