//! API routes

use crate::api::handlers::{
    create_item, delete_item, get_data, health_check, list_items, root, update_item, AppState,
};
use crate::auth::handlers::{login, register};
use crate::auth::middleware::authenticate;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

/// Build the API routes
pub fn build_api_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/token", post(login));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/api/data", get(get_data))
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/:id", put(update_item).delete(delete_item))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public_routes.merge(protected_routes).with_state(state)
}
