//! Staged stock adjustments
//!
//! A ledger operation first decides every quantity change it needs, checks
//! them, and only then commits the whole batch through
//! [`ProductService::commit_stock`](super::ProductService::commit_stock) in a
//! single write. Nothing reaches the product collection if validation fails.

use std::collections::BTreeMap;

use shared::{quantities_by_product, OrderItem};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

fn out_of_range() -> AppError {
    AppError::validation("quantity", "Stock change is out of range")
}

/// One signed change to a product's on-hand quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub product_id: Uuid,
    pub delta: i64,
}

/// The stock changes of one unit of work, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockChanges {
    adjustments: Vec<StockAdjustment>,
}

impl StockChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a change. Zero deltas are dropped.
    pub fn add(&mut self, product_id: Uuid, delta: i64) {
        if delta != 0 {
            self.adjustments.push(StockAdjustment { product_id, delta });
        }
    }

    /// Stage `+quantity` for every item (goods coming in)
    pub fn add_items(&mut self, items: &[OrderItem]) {
        for item in items {
            self.add(item.product_id, item.quantity);
        }
    }

    /// Stage `-quantity` for every item (goods going out)
    pub fn remove_items(&mut self, items: &[OrderItem]) {
        for item in items {
            self.add(item.product_id, -item.quantity);
        }
    }

    /// Per-product change that turns the stock effect of `old` into that of
    /// `new`, where each item list adds its quantities to stock
    pub fn between(old: &[OrderItem], new: &[OrderItem]) -> AppResult<Self> {
        let mut net: BTreeMap<Uuid, i64> = quantities_by_product(new)?;
        for (product_id, quantity) in quantities_by_product(old)? {
            let delta = net.entry(product_id).or_insert(0);
            *delta = delta.checked_sub(quantity).ok_or_else(out_of_range)?;
        }

        let mut changes = Self::new();
        for (product_id, delta) in net {
            changes.add(product_id, delta);
        }
        Ok(changes)
    }

    /// Net change per product
    pub fn net_by_product(&self) -> AppResult<BTreeMap<Uuid, i64>> {
        let mut net = BTreeMap::new();
        for adjustment in &self.adjustments {
            let total = net.entry(adjustment.product_id).or_insert(0i64);
            *total = total.checked_add(adjustment.delta).ok_or_else(out_of_range)?;
        }
        Ok(net)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockAdjustment> {
        self.adjustments.iter()
    }

    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}
