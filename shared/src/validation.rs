//! Validation utilities for the Inventory Ledger platform
//!
//! Pure checks shared by the backend services and the WASM helpers.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{order_total, quantities_by_product, OrderItem};

// ============================================================================
// Catalog Validations
// ============================================================================

/// Longest SKU the catalog accepts
pub const MAX_SKU_LENGTH: usize = 64;

/// Validate a SKU: non-empty, no surrounding whitespace, bounded length
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.is_empty() {
        return Err("SKU is required");
    }
    if sku.trim() != sku {
        return Err("SKU must not start or end with whitespace");
    }
    if sku.len() > MAX_SKU_LENGTH {
        return Err("SKU must be at most 64 characters");
    }
    Ok(())
}

/// Largest quantity accepted for a catalog entry or a single order line
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Largest unit price, in USD, accepted for a product or an order line
pub const MAX_UNIT_PRICE_USD: i64 = 1_000_000_000;

/// Validate an on-hand quantity entered through the catalog
pub fn validate_stock_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Quantity cannot be negative");
    }
    if quantity > MAX_QUANTITY {
        return Err("Quantity must be at most 1000000000");
    }
    Ok(())
}

/// Validate a unit price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    if price > Decimal::from(MAX_UNIT_PRICE_USD) {
        return Err("Price must be at most 1000000000");
    }
    Ok(())
}

/// Validate a reorder level
pub fn validate_reorder_level(level: i64) -> Result<(), &'static str> {
    if level < 0 {
        return Err("Reorder level cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Order Validations
// ============================================================================

/// Problems with an order's item list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderItemError {
    #[error("Order must contain at least one item")]
    Empty,

    #[error("Item {index} ({name}) must have a quantity greater than zero")]
    NonPositiveQuantity { index: usize, name: String },

    #[error("Item {index} ({name}) cannot have a negative price")]
    NegativePrice { index: usize, name: String },

    #[error("Item {index} ({name}) must have a quantity of at most 1000000000")]
    QuantityTooLarge { index: usize, name: String },

    #[error("Item {index} ({name}) must have a price of at most 1000000000")]
    PriceTooLarge { index: usize, name: String },

    #[error("Total quantity of {name} is out of range")]
    QuantityOutOfRange { name: String },

    #[error("Order total is out of range")]
    TotalOutOfRange,
}

/// Validate an order's items: at least one, quantities in `1..=MAX_QUANTITY`,
/// prices in `0..=MAX_UNIT_PRICE_USD`, and a total that can be computed
pub fn validate_order_items(items: &[OrderItem]) -> Result<(), OrderItemError> {
    if items.is_empty() {
        return Err(OrderItemError::Empty);
    }
    for (index, item) in items.iter().enumerate() {
        let name = || item.name.clone();
        if item.quantity <= 0 {
            return Err(OrderItemError::NonPositiveQuantity { index, name: name() });
        }
        if item.quantity > MAX_QUANTITY {
            return Err(OrderItemError::QuantityTooLarge { index, name: name() });
        }
        if item.price_usd < Decimal::ZERO {
            return Err(OrderItemError::NegativePrice { index, name: name() });
        }
        if item.price_usd > Decimal::from(MAX_UNIT_PRICE_USD) {
            return Err(OrderItemError::PriceTooLarge { index, name: name() });
        }
    }
    quantities_by_product(items)?;
    order_total(items)?;
    Ok(())
}

/// Validate an exchange rate multiplier
pub fn validate_exchange_rate(rate: Decimal) -> Result<(), &'static str> {
    if rate <= Decimal::ZERO {
        return Err("Exchange rate must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.')
    {
        return Err("Invalid email format");
    }
    Ok(())
}

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}
