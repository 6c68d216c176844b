//! HTTP handlers for customers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::Customer;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::customer::{CreateCustomerInput, UpdateCustomerInput};
use crate::services::CustomerService;
use crate::AppState;

pub async fn list_customers(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    let service = CustomerService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Customer>> {
    let service = CustomerService::new(state.db);
    Ok(Json(service.get(id).await?))
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let service = CustomerService::new(state.db);
    let customer = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCustomerInput>,
) -> AppResult<Json<Customer>> {
    let service = CustomerService::new(state.db);
    Ok(Json(service.update(id, input).await?))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CustomerService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
