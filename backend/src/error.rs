//! Error handling for the Inventory Ledger platform
//!
//! Every failure surfaces to the UI as a stable code plus a readable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::OrderItemError;
use thiserror::Error;

use crate::store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Ledger and catalog rule violations
    #[error("Product with SKU {0} already exists")]
    DuplicateSku(String),

    #[error("Not enough stock for {item}. Available: {available}, Requested: {requested}.")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    #[error("Category \"{0}\" is in use by one or more products")]
    CategoryInUse(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    /// Machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::DuplicateEntry(_) => "DUPLICATE_ENTRY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateSku(_) => "DUPLICATE_SKU",
            AppError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            AppError::CategoryInUse(_) => "CATEGORY_IN_USE",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::TokenExpired
            | AppError::InvalidToken
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::DuplicateEntry(_) | AppError::DuplicateSku(_) | AppError::CategoryInUse(_) => {
                StatusCode::CONFLICT
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                AppError::validation(*field, message)
            }
            None => AppError::validation("input", "Invalid input"),
        }
    }
}

impl From<OrderItemError> for AppError {
    fn from(err: OrderItemError) -> Self {
        AppError::validation("items", err.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::TokenExpired => "Token has expired".to_string(),
            AppError::NotFound(resource) => format!("{} not found", resource),
            AppError::DuplicateEntry(what) => format!("{} already exists", what),
            AppError::Validation { message, .. } => message.clone(),
            // Internal details stay in the logs
            AppError::Storage(_) => "A storage error occurred".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let field = match &self {
            AppError::Validation { field, .. } => Some(field.clone()),
            AppError::DuplicateSku(_) => Some("sku".to_string()),
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for services and handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_item() {
        let err = AppError::InsufficientStock {
            item: "Widget".to_string(),
            available: 3,
            requested: 7,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for Widget. Available: 3, Requested: 7."
        );
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
    }

    #[test]
    fn test_rule_violations_are_conflicts() {
        assert_eq!(AppError::DuplicateSku("A1".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::CategoryInUse("Widgets".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::not_found("Sales order").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_order_item_error_becomes_validation() {
        let err: AppError = OrderItemError::Empty.into();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "items"));
    }
}
