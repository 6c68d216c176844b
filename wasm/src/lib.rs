//! WebAssembly module for the Inventory Ledger platform
//!
//! Lets the browser UI run the same rules the backend enforces before a
//! request is sent:
//! - Order totals and currency conversion
//! - Stock level classification
//! - SKU and order item checks

use std::str::FromStr;

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse_items(items_json: &str) -> Result<Vec<OrderItem>, JsValue> {
    serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid items JSON: {}", e)))
}

fn parse_decimal(value: &str, what: &str) -> Result<Decimal, JsValue> {
    Decimal::from_str(value.trim())
        .map_err(|_| JsValue::from_str(&format!("Invalid {}: {}", what, value)))
}

/// Order total in USD for a JSON array of order items, as a decimal string
#[wasm_bindgen]
pub fn calculate_order_total(items_json: &str) -> Result<String, JsValue> {
    let items = parse_items(items_json)?;
    order_total(&items)
        .map(|total| total.to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a USD amount to ETB using the given rate
#[wasm_bindgen]
pub fn convert_usd_to_etb(amount_usd: &str, rate: &str) -> Result<String, JsValue> {
    let amount = parse_decimal(amount_usd, "amount")?;
    let rate = parse_decimal(rate, "exchange rate")?;
    validate_exchange_rate(rate).map_err(JsValue::from_str)?;
    amount
        .checked_mul(rate)
        .map(|etb| etb.round_dp(2).to_string())
        .ok_or_else(|| JsValue::from_str("Amount is out of range"))
}

/// Stock label for a quantity. A negative reorder level means none is set.
#[wasm_bindgen]
pub fn stock_status(quantity: i64, reorder_level: i64) -> String {
    let level = (reorder_level >= 0).then_some(reorder_level);
    classify_stock(quantity, level).to_string()
}

#[wasm_bindgen]
pub fn is_low_stock(quantity: i64, reorder_level: i64) -> bool {
    classify_stock(quantity, Some(reorder_level)) == StockStatus::LowStock
}

/// Returns an error message for a bad SKU, or `None` when it is acceptable
#[wasm_bindgen]
pub fn validate_sku_format(sku: &str) -> Option<String> {
    validate_sku(sku).err().map(str::to_string)
}

/// Returns an error message for a bad item list, or `None` when it is acceptable
#[wasm_bindgen]
pub fn validate_order_items_json(items_json: &str) -> Result<Option<String>, JsValue> {
    let items = parse_items(items_json)?;
    Ok(validate_order_items(&items).err().map(|e| e.to_string()))
}
