use axum::Json;
use serde_json::Value;

/// Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}
