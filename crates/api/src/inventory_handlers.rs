use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use catalog::Sweet;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    #[serde(default = "default_purchase_quantity")]
    pub quantity: i64,
}

fn default_purchase_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: i64,
}

/// POST /sweets/{id}/purchase
pub async fn purchase(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(payload): Json<PurchaseRequest>,
) -> Result<Json<Sweet>, ApiError> {
    let sweet = state.inventory.purchase(id, payload.quantity).await?;
    tracing::info!(buyer = %user.email, sweet = id, quantity = payload.quantity, "purchase completed");
    Ok(Json(sweet))
}

/// POST /sweets/{id}/restock (admin)
pub async fn restock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(payload): Json<RestockRequest>,
) -> Result<Json<Sweet>, ApiError> {
    let sweet = state.inventory.restock(id, payload.quantity).await?;
    tracing::info!(admin = %user.email, sweet = id, quantity = payload.quantity, "restock completed");
    Ok(Json(sweet))
}
