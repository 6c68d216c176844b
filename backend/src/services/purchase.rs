//! Purchase side of the order ledger
//!
//! A purchase order's items count toward stock only while its shipping status
//! is `Received`. Entering `Received` adds the (merged) items, leaving it
//! removes the items that were added, and deleting a received order removes
//! them as well. No sufficiency check applies here.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use shared::{
    validate_exchange_rate, validate_order_items, OrderItem, PaymentStatus, PurchaseOrder,
    PurchaseStatus, ShippingStatus, Supplier,
};

use super::product::ProductService;
use super::settings::SettingsService;
use super::stock::StockChanges;
use crate::config::ItemChangePolicy;
use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage, WriteGuard};

/// Purchase order service
#[derive(Clone)]
pub struct PurchaseService {
    db: Storage,
    orders: Repository<PurchaseOrder>,
    suppliers: Repository<Supplier>,
    products: ProductService,
    settings: SettingsService,
    policy: ItemChangePolicy,
}

/// A purchase order as submitted by the UI
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDraft {
    pub supplier_id: Uuid,
    pub supplier_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PurchaseStatus,
    #[serde(default)]
    pub shipping_status: ShippingStatus,
    pub exchange_rate: Option<Decimal>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchaseOrderInput {
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub order_date: Option<NaiveDate>,
    pub status: Option<PurchaseStatus>,
    pub shipping_status: Option<ShippingStatus>,
    pub exchange_rate: Option<Decimal>,
    pub payment_status: Option<PaymentStatus>,
}

impl PurchaseService {
    pub fn new(db: Storage, policy: ItemChangePolicy) -> Self {
        Self {
            orders: db.repository(Collection::PurchaseOrders),
            suppliers: db.repository(Collection::Suppliers),
            products: ProductService::new(db.clone()),
            settings: SettingsService::new(db.clone()),
            db,
            policy,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<PurchaseOrder>> {
        Ok(self.orders.load_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<PurchaseOrder> {
        self.orders
            .find(|o| o.id == id)
            .await?
            .ok_or_else(|| AppError::not_found("Purchase order"))
    }

    /// Create a purchase order; a received one adds its items to stock
    pub async fn create(&self, draft: PurchaseOrderDraft) -> AppResult<PurchaseOrder> {
        validate_order_items(&draft.items)?;
        if let Some(rate) = draft.exchange_rate {
            validate_exchange_rate(rate).map_err(|msg| AppError::validation("exchangeRate", msg))?;
        }

        let guard = self.db.lock().await;

        let supplier_name = self
            .resolve_supplier_name(draft.supplier_id, draft.supplier_name)
            .await?;
        let exchange_rate = match draft.exchange_rate {
            Some(rate) => rate,
            None => self.settings.get().await?.exchange_rate_usd_etb,
        };

        let mut order = PurchaseOrder {
            id: Uuid::new_v4(),
            supplier_id: draft.supplier_id,
            supplier_name,
            items: draft.items,
            order_date: draft.order_date.unwrap_or_else(|| Utc::now().date_naive()),
            status: draft.status,
            shipping_status: draft.shipping_status,
            total_amount_usd: Decimal::ZERO,
            exchange_rate,
            payment_status: draft.payment_status,
        };
        order.recompute_total()?;

        let mut orders = self.orders.load_all().await?;
        orders.push(order.clone());

        let mut changes = StockChanges::new();
        if order.is_received() {
            changes.add_items(&order.items);
        }
        let applied = self.commit(&guard, &changes, &orders).await?;
        if applied > 0 {
            info!(order_id = %order.id, applied, "received purchase order added to stock");
        }

        info!(
            order_id = %order.id,
            shipping_status = %order.shipping_status,
            total = %order.total_amount_usd,
            "purchase order created"
        );
        Ok(order)
    }

    /// Shallow-merge `input` into a purchase order and apply the stock effect
    /// of any move into or out of `Received`
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        if let Some(items) = &input.items {
            validate_order_items(items)?;
        }
        if let Some(rate) = input.exchange_rate {
            validate_exchange_rate(rate).map_err(|msg| AppError::validation("exchangeRate", msg))?;
        }

        let guard = self.db.lock().await;
        let mut orders = self.orders.load_all().await?;
        let index = orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| AppError::not_found("Purchase order"))?;

        let old = orders[index].clone();
        let mut merged = old.clone();
        if let Some(supplier_id) = input.supplier_id {
            merged.supplier_id = supplier_id;
        }
        if merged.supplier_id != old.supplier_id {
            merged.supplier_name = self
                .resolve_supplier_name(merged.supplier_id, input.supplier_name)
                .await?;
        } else if let Some(supplier_name) = input.supplier_name {
            merged.supplier_name = supplier_name;
        }
        if let Some(items) = input.items {
            merged.items = items;
        }
        if let Some(order_date) = input.order_date {
            merged.order_date = order_date;
        }
        if let Some(status) = input.status {
            merged.status = status;
        }
        if let Some(shipping_status) = input.shipping_status {
            merged.shipping_status = shipping_status;
        }
        if let Some(rate) = input.exchange_rate {
            merged.exchange_rate = rate;
        }
        if let Some(status) = input.payment_status {
            merged.payment_status = status;
        }
        merged.recompute_total()?;
        orders[index] = merged.clone();

        let changes = self.receiving_changes(&old, &merged)?;
        let applied = self.commit(&guard, &changes, &orders).await?;
        if applied > 0 {
            info!(
                order_id = %id,
                from = %old.shipping_status,
                to = %merged.shipping_status,
                applied,
                "purchase order stock adjusted"
            );
        }
        Ok(merged)
    }

    /// Delete a purchase order; a received one takes its items back out of stock
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let guard = self.db.lock().await;
        let mut orders = self.orders.load_all().await?;
        let index = orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| AppError::not_found("Purchase order"))?;

        let order = orders.remove(index);
        let mut changes = StockChanges::new();
        if order.is_received() {
            changes.remove_items(&order.items);
        }
        let applied = self.commit(&guard, &changes, &orders).await?;
        if applied > 0 {
            info!(order_id = %id, applied, "received purchase order removed from stock");
        }
        Ok(())
    }

    /// Stock changes implied by moving from `old` to `merged`
    fn receiving_changes(
        &self,
        old: &PurchaseOrder,
        merged: &PurchaseOrder,
    ) -> AppResult<StockChanges> {
        let mut changes = StockChanges::new();
        match (old.is_received(), merged.is_received()) {
            (false, true) => changes.add_items(&merged.items),
            (true, false) => changes.remove_items(&old.items),
            (true, true) if merged.items != old.items => match self.policy {
                ItemChangePolicy::Preserve => {
                    debug!(order_id = %old.id, "received order items changed; stock left as is");
                }
                ItemChangePolicy::Reconcile => {
                    changes = StockChanges::between(&old.items, &merged.items)?;
                }
            },
            _ => {}
        }
        Ok(changes)
    }

    /// Write stock changes, then the order collection. If the order write
    /// fails the product collection is put back as it was.
    async fn commit(
        &self,
        guard: &WriteGuard<'_>,
        changes: &StockChanges,
        orders: &[PurchaseOrder],
    ) -> AppResult<usize> {
        if changes.is_empty() {
            self.orders.save_all(orders).await?;
            return Ok(0);
        }

        let snapshot = self.db.snapshot(guard, &[Collection::Products]).await?;
        let applied = self.products.commit_stock(guard, changes).await?;
        snapshot
            .restore_on_error(self.orders.save_all(orders).await)
            .await?;
        Ok(applied)
    }

    async fn resolve_supplier_name(&self, id: Uuid, name: Option<String>) -> AppResult<String> {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            return Ok(name);
        }
        self.suppliers
            .find(|s| s.id == id)
            .await?
            .map(|s| s.name)
            .ok_or_else(|| AppError::validation("supplierId", "Supplier not found"))
    }
}
