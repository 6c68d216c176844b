//! HTTP handlers for application settings

use axum::{extract::State, Json};
use shared::Settings;

use crate::error::AppResult;
use crate::services::SettingsService;
use crate::AppState;

pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<Settings>> {
    let service = SettingsService::new(state.db);
    Ok(Json(service.get().await?))
}

/// Save settings. Affects orders created afterwards only.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> AppResult<Json<Settings>> {
    let service = SettingsService::new(state.db);
    Ok(Json(service.save(settings).await?))
}
