//! HTTP handlers for the product catalog

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::Product;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::product::{CreateProductInput, UpdateProductInput};
use crate::services::ProductService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StockAdjustmentRequest {
    pub delta: i64,
}

#[derive(Debug, Serialize)]
pub struct GeneratedSku {
    pub sku: String,
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    Ok(Json(service.get(id).await?))
}

/// Look up a product by its exact SKU
pub async fn get_product_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service
        .find_by_sku(&sku)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    Ok(Json(product))
}

/// Look up a product by a scanned barcode
pub async fn get_product_by_barcode(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service
        .find_by_barcode(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    Ok(Json(service.update(id, input).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a manual stock correction and return the updated product
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StockAdjustmentRequest>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    if !service.adjust_stock(id, body.delta).await? {
        return Err(AppError::not_found("Product"));
    }
    Ok(Json(service.get(id).await?))
}

/// Suggest a SKU no product uses yet
pub async fn generate_sku(State(state): State<AppState>) -> AppResult<Json<GeneratedSku>> {
    let service = ProductService::new(state.db);
    let sku = service.generate_unique_sku().await?;
    Ok(Json(GeneratedSku { sku }))
}
