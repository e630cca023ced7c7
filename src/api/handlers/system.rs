//! System handlers: service banner and health check

use crate::api::models::StatusResponse;
use axum::Json;
use serde_json::{json, Value};

/// Handler for GET / - Public service banner
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online".to_string(),
        message: "Taskboard backend protected with JWT".to_string(),
    })
}

/// Handler for GET /health - Health check
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_banner() {
        let response = root().await;
        assert_eq!(response.0.status, "online");
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await;
        let value = response.0;

        assert_eq!(value["status"], "ok");
        assert!(value["version"].is_string());
        assert!(value["timestamp"].is_number());
    }
}
