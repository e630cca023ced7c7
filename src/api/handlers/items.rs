//! Item CRUD handlers
//!
//! All routes here sit behind the authentication middleware; none of them
//! differentiate by acting identity.

use crate::api::models::{CreateItemRequest, DataResponse, UpdateItemRequest};
use crate::auth::middleware::AuthUser;
use crate::core::error::{BoardError, Result};
use crate::db::models::Item;
use crate::db::repository::Repository;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::AppState;

/// Handler for GET /api/data - Item list plus the acting username
pub async fn get_data(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DataResponse>> {
    let items = state.item_repo.find_all().await?;

    Ok(Json(DataResponse {
        items,
        user_active: user.username,
    }))
}

/// Handler for GET /api/items - List all items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    let items = state.item_repo.find_all().await?;
    Ok(Json(items))
}

/// Handler for POST /api/items - Create a new item
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<impl IntoResponse> {
    if req.name.trim().is_empty() {
        return Err(BoardError::ValidationError(
            "name cannot be empty".to_string(),
        ));
    }

    let item = state.item_repo.create(&req.name, req.status).await?;

    tracing::info!(item_id = item.id, status = %item.status, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for PUT /api/items/:id - Partial update of an item
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<Item>> {
    if let Some(ref name) = req.name {
        if name.trim().is_empty() {
            return Err(BoardError::ValidationError(
                "name cannot be empty".to_string(),
            ));
        }
    }

    let item = state.item_repo.update(id, req.name, req.status).await?;

    tracing::info!(item_id = item.id, status = %item.status, "Item updated");

    Ok(Json(item))
}

/// Handler for DELETE /api/items/:id - Delete an item
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.item_repo.delete(id).await?;

    tracing::info!(item_id = id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}
