//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    /// Unique stock keeping unit (case-sensitive)
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category name, not id
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// On-hand stock. Order code changes it only through stock adjustments.
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i64>,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// Stock level classification used by the dashboard and the UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "In Stock"),
            StockStatus::LowStock => write!(f, "Low Stock"),
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
        }
    }
}

/// Classify a stock level against an optional reorder level.
///
/// A reorder level of zero (or none) never reports low stock.
pub fn classify_stock(quantity: i64, reorder_level: Option<i64>) -> StockStatus {
    if quantity <= 0 {
        return StockStatus::OutOfStock;
    }
    match reorder_level {
        Some(level) if level > 0 && quantity <= level => StockStatus::LowStock,
        _ => StockStatus::InStock,
    }
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        classify_stock(self.quantity, self.reorder_level)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_status() == StockStatus::LowStock
    }

    /// Barcode lookups ignore blank barcodes left behind by CSV imports
    pub fn has_barcode(&self, barcode: &str) -> bool {
        !barcode.is_empty() && self.barcode.as_deref() == Some(barcode)
    }
}

/// Product export columns, in the fixed CSV order
pub const PRODUCT_CSV_COLUMNS: [&str; 9] = [
    "id",
    "sku",
    "name",
    "description",
    "category",
    "quantity",
    "price",
    "imageUrl",
    "barcode",
];
