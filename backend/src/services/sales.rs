//! Sales side of the order ledger
//!
//! A sales order's existence means its items have been taken out of stock
//! exactly once. Creation checks every item before touching stock, then
//! commits all deductions in one write; deletion puts the quantities back.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use shared::{
    quantities_by_product, validate_exchange_rate, validate_order_items, Customer, OrderItem,
    PaymentStatus, Product, SalesOrder,
};

use super::product::ProductService;
use super::settings::SettingsService;
use super::stock::StockChanges;
use crate::config::ItemChangePolicy;
use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage, WriteGuard};

/// Sales order service
#[derive(Clone)]
pub struct SalesService {
    db: Storage,
    orders: Repository<SalesOrder>,
    customers: Repository<Customer>,
    products: ProductService,
    settings: SettingsService,
    policy: ItemChangePolicy,
}

/// A sales order as submitted by the UI. Any total it carries is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderDraft {
    pub customer_id: Uuid,
    /// Looked up from the customer registry when absent
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
    /// Defaults to today
    pub order_date: Option<NaiveDate>,
    /// Defaults to the rate in settings
    pub exchange_rate: Option<Decimal>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

/// Partial sales order update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalesOrderInput {
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub order_date: Option<NaiveDate>,
    pub exchange_rate: Option<Decimal>,
    pub payment_status: Option<PaymentStatus>,
}

impl SalesService {
    pub fn new(db: Storage, policy: ItemChangePolicy) -> Self {
        Self {
            orders: db.repository(Collection::SalesOrders),
            customers: db.repository(Collection::Customers),
            products: ProductService::new(db.clone()),
            settings: SettingsService::new(db.clone()),
            db,
            policy,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<SalesOrder>> {
        Ok(self.orders.load_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<SalesOrder> {
        self.orders
            .find(|o| o.id == id)
            .await?
            .ok_or_else(|| AppError::not_found("Sales order"))
    }

    /// Create a sales order and deduct its items from stock
    pub async fn create(&self, draft: SalesOrderDraft) -> AppResult<SalesOrder> {
        validate_order_items(&draft.items)?;
        if let Some(rate) = draft.exchange_rate {
            validate_exchange_rate(rate).map_err(|msg| AppError::validation("exchangeRate", msg))?;
        }

        let guard = self.db.lock().await;

        let products = self.products.list().await?;
        let demand = quantities_by_product(&draft.items)?;
        ensure_available(&products, &demand, &draft.items)?;

        let customer_name = self
            .resolve_customer_name(draft.customer_id, draft.customer_name)
            .await?;
        let exchange_rate = match draft.exchange_rate {
            Some(rate) => rate,
            None => self.settings.get().await?.exchange_rate_usd_etb,
        };

        let mut order = SalesOrder {
            id: Uuid::new_v4(),
            customer_id: draft.customer_id,
            customer_name,
            items: draft.items,
            order_date: draft.order_date.unwrap_or_else(|| Utc::now().date_naive()),
            total_amount_usd: Decimal::ZERO,
            exchange_rate,
            payment_status: draft.payment_status,
        };
        order.recompute_total()?;

        let mut orders = self.orders.load_all().await?;
        orders.push(order.clone());

        let mut changes = StockChanges::new();
        changes.remove_items(&order.items);
        self.commit(&guard, &changes, &orders).await?;

        info!(
            order_id = %order.id,
            items = order.items.len(),
            total = %order.total_amount_usd,
            "sales order created"
        );
        Ok(order)
    }

    /// Shallow-merge `input` into a sales order. Item changes touch stock
    /// only under [`ItemChangePolicy::Reconcile`].
    pub async fn update(&self, id: Uuid, input: UpdateSalesOrderInput) -> AppResult<SalesOrder> {
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
            .ok_or_else(|| AppError::not_found("Sales order"))?;

        let old = orders[index].clone();
        let mut merged = old.clone();
        if let Some(customer_id) = input.customer_id {
            merged.customer_id = customer_id;
        }
        if merged.customer_id != old.customer_id {
            merged.customer_name = self
                .resolve_customer_name(merged.customer_id, input.customer_name)
                .await?;
        } else if let Some(customer_name) = input.customer_name {
            merged.customer_name = customer_name;
        }
        if let Some(items) = input.items {
            merged.items = items;
        }
        if let Some(order_date) = input.order_date {
            merged.order_date = order_date;
        }
        if let Some(rate) = input.exchange_rate {
            merged.exchange_rate = rate;
        }
        if let Some(status) = input.payment_status {
            merged.payment_status = status;
        }
        merged.recompute_total()?;
        orders[index] = merged.clone();

        let changes = if merged.items == old.items {
            StockChanges::new()
        } else {
            match self.policy {
                ItemChangePolicy::Preserve => {
                    debug!(order_id = %id, "sales order items changed; stock left as is");
                    StockChanges::new()
                }
                ItemChangePolicy::Reconcile => {
                    // Selling more of a product takes stock out, selling less puts it back
                    let changes = StockChanges::between(&merged.items, &old.items)?;
                    let extra_demand: BTreeMap<Uuid, i64> = changes
                        .net_by_product()?
                        .into_iter()
                        .filter(|(_, delta)| *delta < 0)
                        .map(|(product_id, delta)| (product_id, delta.saturating_neg()))
                        .collect();

                    let products = self.products.list().await?;
                    ensure_available(&products, &extra_demand, &merged.items)?;
                    changes
                }
            }
        };

        let applied = self.commit(&guard, &changes, &orders).await?;
        if applied > 0 {
            info!(order_id = %id, applied, "sales order items reconciled");
        }
        Ok(merged)
    }

    /// Delete a sales order and return its items to stock
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let guard = self.db.lock().await;
        let mut orders = self.orders.load_all().await?;
        let index = orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| AppError::not_found("Sales order"))?;

        let order = orders.remove(index);
        let mut changes = StockChanges::new();
        changes.add_items(&order.items);
        let applied = self.commit(&guard, &changes, &orders).await?;
        info!(order_id = %id, applied, "sales order deleted; stock returned");
        Ok(())
    }

    /// Write stock changes, then the order collection. If the order write
    /// fails the product collection is put back as it was.
    async fn commit(
        &self,
        guard: &WriteGuard<'_>,
        changes: &StockChanges,
        orders: &[SalesOrder],
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

    async fn resolve_customer_name(&self, id: Uuid, name: Option<String>) -> AppResult<String> {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            return Ok(name);
        }
        self.customers
            .find(|c| c.id == id)
            .await?
            .map(|c| c.name)
            .ok_or_else(|| AppError::validation("customerId", "Customer not found"))
    }
}

/// Check that every product can cover the requested quantity.
///
/// `demand` is keyed by product; the error names the first item that
/// references the short product.
fn ensure_available(
    products: &[Product],
    demand: &BTreeMap<Uuid, i64>,
    items: &[OrderItem],
) -> AppResult<()> {
    for item in items {
        let Some(&requested) = demand.get(&item.product_id) else {
            continue;
        };
        let available = products
            .iter()
            .find(|p| p.id == item.product_id)
            .map(|p| p.quantity)
            .unwrap_or(0);

        if available < requested {
            return Err(AppError::InsufficientStock {
                item: item.name.clone(),
                available,
                requested,
            });
        }
    }
    Ok(())
}
