//! Sales and purchase order models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::OrderItemError;

/// A line on a sales or purchase order.
///
/// `name` and `price_usd` are snapshots taken when the order was placed, so
/// later product edits (or deletion) never rewrite order history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i64,
    #[serde(rename = "priceUSD")]
    pub price_usd: Decimal,
}

impl OrderItem {
    /// `price_usd * quantity`, or `None` if it does not fit a `Decimal`
    pub fn line_total(&self) -> Option<Decimal> {
        self.price_usd.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sum of `price_usd * quantity` over all items
pub fn order_total(items: &[OrderItem]) -> Result<Decimal, OrderItemError> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.line_total()
            .and_then(|line| total.checked_add(line))
            .ok_or(OrderItemError::TotalOutOfRange)
    })
}

/// Total quantity per product, summed across items that share a product
pub fn quantities_by_product(items: &[OrderItem]) -> Result<BTreeMap<Uuid, i64>, OrderItemError> {
    let mut totals = BTreeMap::new();
    for item in items {
        let total = totals.entry(item.product_id).or_insert(0i64);
        *total = total
            .checked_add(item.quantity)
            .ok_or_else(|| OrderItemError::QuantityOutOfRange {
                name: item.name.clone(),
            })?;
    }
    Ok(totals)
}

/// Payment state shared by both order kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Partial,
}

/// Fulfilment state of a purchase order. Never affects stock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Partial,
    Complete,
}

/// Shipping state of a purchase order.
///
/// Any value may move to any other; only entering or leaving `Received`
/// touches stock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ShippingStatus {
    #[default]
    Pending,
    #[serde(rename = "On the Way")]
    OnTheWay,
    Received,
}

impl ShippingStatus {
    pub fn is_received(&self) -> bool {
        matches!(self, ShippingStatus::Received)
    }
}

impl std::fmt::Display for ShippingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShippingStatus::Pending => write!(f, "Pending"),
            ShippingStatus::OnTheWay => write!(f, "On the Way"),
            ShippingStatus::Received => write!(f, "Received"),
        }
    }
}

/// A sale to a customer. Its existence means its items were taken out of stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub order_date: NaiveDate,
    #[serde(rename = "totalAmountUSD")]
    pub total_amount_usd: Decimal,
    /// USD to ETB multiplier captured at order time
    pub exchange_rate: Decimal,
    pub payment_status: PaymentStatus,
}

impl SalesOrder {
    pub fn recompute_total(&mut self) -> Result<(), OrderItemError> {
        self.total_amount_usd = order_total(&self.items)?;
        Ok(())
    }

    pub fn total_in_local_currency(&self) -> Option<Decimal> {
        self.total_amount_usd.checked_mul(self.exchange_rate)
    }
}

/// A purchase from a supplier. Its items count toward stock only while received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub items: Vec<OrderItem>,
    pub order_date: NaiveDate,
    pub status: PurchaseStatus,
    pub shipping_status: ShippingStatus,
    #[serde(rename = "totalAmountUSD")]
    pub total_amount_usd: Decimal,
    pub exchange_rate: Decimal,
    pub payment_status: PaymentStatus,
}

impl PurchaseOrder {
    pub fn recompute_total(&mut self) -> Result<(), OrderItemError> {
        self.total_amount_usd = order_total(&self.items)?;
        Ok(())
    }

    pub fn is_received(&self) -> bool {
        self.shipping_status.is_received()
    }

    pub fn total_in_local_currency(&self) -> Option<Decimal> {
        self.total_amount_usd.checked_mul(self.exchange_rate)
    }
}
