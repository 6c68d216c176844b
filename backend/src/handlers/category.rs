//! HTTP handlers for categories

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::Category;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::category::CategoryInput;
use crate::services::CategoryService;
use crate::AppState;

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let service = CategoryService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db);
    Ok(Json(service.get(id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let service = CategoryService::new(state.db);
    let category = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db);
    Ok(Json(service.update(id, input).await?))
}

/// Delete a category; refused while products still use it
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CategoryService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
