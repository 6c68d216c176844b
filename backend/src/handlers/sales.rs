//! HTTP handlers for sales orders

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::SalesOrder;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::sales::{SalesOrderDraft, UpdateSalesOrderInput};
use crate::services::SalesService;
use crate::AppState;

fn service(state: AppState) -> SalesService {
    SalesService::new(state.db, state.config.ledger.item_change_policy)
}

pub async fn list_sales_orders(State(state): State<AppState>) -> AppResult<Json<Vec<SalesOrder>>> {
    Ok(Json(service(state).list().await?))
}

pub async fn get_sales_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SalesOrder>> {
    Ok(Json(service(state).get(id).await?))
}

/// Place a sales order. Fails without touching stock if any item is short.
pub async fn create_sales_order(
    State(state): State<AppState>,
    Json(draft): Json<SalesOrderDraft>,
) -> AppResult<(StatusCode, Json<SalesOrder>)> {
    let order = service(state).create(draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_sales_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSalesOrderInput>,
) -> AppResult<Json<SalesOrder>> {
    Ok(Json(service(state).update(id, input).await?))
}

/// Delete a sales order and return its items to stock
pub async fn delete_sales_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    service(state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
