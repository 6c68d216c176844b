//! HTTP handlers for suppliers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::Supplier;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::supplier::{CreateSupplierInput, UpdateSupplierInput};
use crate::services::SupplierService;
use crate::AppState;

pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    Ok(Json(service.get(id).await?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = SupplierService::new(state.db);
    let supplier = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    Ok(Json(service.update(id, input).await?))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = SupplierService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
