//! HTTP handlers for purchase orders

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::PurchaseOrder;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::purchase::{PurchaseOrderDraft, UpdatePurchaseOrderInput};
use crate::services::PurchaseService;
use crate::AppState;

fn service(state: AppState) -> PurchaseService {
    PurchaseService::new(state.db, state.config.ledger.item_change_policy)
}

pub async fn list_purchase_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    Ok(Json(service(state).list().await?))
}

pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    Ok(Json(service(state).get(id).await?))
}

pub async fn create_purchase_order(
    State(state): State<AppState>,
    Json(draft): Json<PurchaseOrderDraft>,
) -> AppResult<(StatusCode, Json<PurchaseOrder>)> {
    let order = service(state).create(draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Update a purchase order; moving into or out of Received adjusts stock
pub async fn update_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    Ok(Json(service(state).update(id, input).await?))
}

pub async fn delete_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    service(state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
