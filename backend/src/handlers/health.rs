//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::store::Collection;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // A read of the smallest collection proves the store is reachable
    let storage_status = match state.db.backend().get(Collection::Settings).await {
        Ok(_) => "available".to_string(),
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            "unavailable".to_string()
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage_status,
    })
}
