//! Item request/response models

use crate::db::models::{Item, ItemStatus};
use serde::{Deserialize, Serialize};

/// Create item request
///
/// The status field deserializes through the closed ItemStatus enum, so any
/// value outside the three known labels is rejected at the extraction
/// boundary before a handler runs.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub status: ItemStatus,
}

/// Partial update request; only supplied fields change
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub status: Option<ItemStatus>,
}

/// Response for GET /api/data: the item list plus the acting identity
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse {
    pub items: Vec<Item>,
    pub user_active: String,
}
