use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{
    auth_handlers, inventory_handlers, middleware as auth_middleware, sweet_handlers, AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(|| async { "Sweet Shop Management System API" }))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login));

    // Routes open to any authenticated account
    let user_routes = Router::new()
        .route("/sweets", get(sweet_handlers::list_sweets))
        .route("/sweets/search", get(sweet_handlers::search_sweets))
        .route("/sweets/{id}/purchase", post(inventory_handlers::purchase))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    // Catalog mutation requires the admin role
    let admin_routes = Router::new()
        .route("/sweets", post(sweet_handlers::create_sweet))
        .route("/sweets/{id}", put(sweet_handlers::update_sweet))
        .route("/sweets/{id}", delete(sweet_handlers::delete_sweet))
        .route("/sweets/{id}/restock", post(inventory_handlers::restock))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .with_state(state)
}
