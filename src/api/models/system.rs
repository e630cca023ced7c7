//! System response models

use serde::{Deserialize, Serialize};

/// Response for GET /: service banner
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}
