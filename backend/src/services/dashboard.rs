//! Dashboard aggregation over products and orders

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::{DateRange, OrderKind, Product, PurchaseOrder, SalesOrder};

use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage};

/// Entries shown in each top-N list
const TOP_N: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    products: Repository<Product>,
    sales: Repository<SalesOrder>,
    purchases: Repository<PurchaseOrder>,
}

/// Dashboard figures for an optional date range
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_sales: Decimal,
    pub total_purchases: Decimal,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    /// Lowest quantities first
    pub low_stock_products: Vec<Product>,
    /// Newest first, ignores the date range
    pub recent_activity: Vec<ActivityEntry>,
    pub top_products: Vec<ProductSales>,
    pub daily_totals: Vec<DailyTotals>,
    pub category_distribution: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub party_name: String,
    pub order_date: NaiveDate,
    #[serde(rename = "totalAmountUSD")]
    pub total_amount_usd: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub sales: Decimal,
    pub purchases: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl DashboardService {
    pub fn new(db: Storage) -> Self {
        Self {
            products: db.repository(Collection::Products),
            sales: db.repository(Collection::SalesOrders),
            purchases: db.repository(Collection::PurchaseOrders),
        }
    }

    pub async fn summary(&self, range: DateRange) -> AppResult<DashboardSummary> {
        if !range.is_valid() {
            return Err(AppError::validation(
                "endDate",
                "End date must not be before start date",
            ));
        }

        let products = self.products.load_all().await?;
        let sales = self.sales.load_all().await?;
        let purchases = self.purchases.load_all().await?;
        Ok(summarize(&products, &sales, &purchases, range))
    }
}

pub fn summarize(
    products: &[Product],
    sales: &[SalesOrder],
    purchases: &[PurchaseOrder],
    range: DateRange,
) -> DashboardSummary {
    let sales_in_range: Vec<&SalesOrder> =
        sales.iter().filter(|o| range.contains(o.order_date)).collect();
    let purchases_in_range: Vec<&PurchaseOrder> = purchases
        .iter()
        .filter(|o| range.contains(o.order_date))
        .collect();

    let mut low_stock: Vec<Product> = products.iter().filter(|p| p.is_low_stock()).cloned().collect();
    low_stock.sort_by_key(|p| p.quantity);
    let low_stock_items = low_stock.len();
    low_stock.truncate(TOP_N);

    DashboardSummary {
        total_sales: sum_totals(sales_in_range.iter().map(|o| o.total_amount_usd)),
        total_purchases: sum_totals(purchases_in_range.iter().map(|o| o.total_amount_usd)),
        low_stock_items,
        out_of_stock_items: products.iter().filter(|p| p.quantity == 0).count(),
        low_stock_products: low_stock,
        recent_activity: recent_activity(sales, purchases),
        top_products: top_products(&sales_in_range),
        daily_totals: daily_totals(&sales_in_range, &purchases_in_range),
        category_distribution: category_distribution(products),
    }
}

/// Report sums saturate instead of overflowing
fn sum_totals(totals: impl Iterator<Item = Decimal>) -> Decimal {
    totals.fold(Decimal::ZERO, |sum, total| sum.saturating_add(total))
}

fn recent_activity(sales: &[SalesOrder], purchases: &[PurchaseOrder]) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = sales
        .iter()
        .map(|o| ActivityEntry {
            id: o.id,
            kind: OrderKind::Sale,
            party_name: o.customer_name.clone(),
            order_date: o.order_date,
            total_amount_usd: o.total_amount_usd,
        })
        .chain(purchases.iter().map(|o| ActivityEntry {
            id: o.id,
            kind: OrderKind::Purchase,
            party_name: o.supplier_name.clone(),
            order_date: o.order_date,
            total_amount_usd: o.total_amount_usd,
        }))
        .collect();

    entries.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    entries.truncate(TOP_N);
    entries
}

/// Best sellers by quantity, keyed by the item name snapshot
fn top_products(sales: &[&SalesOrder]) -> Vec<ProductSales> {
    let mut sold: BTreeMap<&str, i64> = BTreeMap::new();
    for item in sales.iter().flat_map(|o| o.items.iter()) {
        let quantity = sold.entry(item.name.as_str()).or_insert(0);
        *quantity = quantity.saturating_add(item.quantity);
    }

    let mut ranked: Vec<ProductSales> = sold
        .into_iter()
        .map(|(name, quantity)| ProductSales {
            name: name.to_string(),
            quantity,
        })
        .collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(TOP_N);
    ranked
}

fn daily_totals(sales: &[&SalesOrder], purchases: &[&PurchaseOrder]) -> Vec<DailyTotals> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for order in sales {
        let day = days.entry(order.order_date).or_default();
        day.0 = day.0.saturating_add(order.total_amount_usd);
    }
    for order in purchases {
        let day = days.entry(order.order_date).or_default();
        day.1 = day.1.saturating_add(order.total_amount_usd);
    }

    days.into_iter()
        .map(|(date, (sales, purchases))| DailyTotals {
            date,
            sales,
            purchases,
        })
        .collect()
}

fn category_distribution(products: &[Product]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}
