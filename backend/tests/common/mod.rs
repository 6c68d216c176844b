//! Shared fixtures for the backend integration tests

#![allow(dead_code)]

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use inventory_backend::config::ItemChangePolicy;
use inventory_backend::services::product::CreateProductInput;
use inventory_backend::services::purchase::PurchaseOrderDraft;
use inventory_backend::services::sales::SalesOrderDraft;
use inventory_backend::services::{ProductService, PurchaseService, SalesService};
use inventory_backend::Storage;
use shared::{OrderItem, PaymentStatus, Product, PurchaseStatus, ShippingStatus};

/// Helper to create Decimal from string
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Services over one fresh in-memory store
pub struct Ledger {
    pub db: Storage,
    pub products: ProductService,
    pub sales: SalesService,
    pub purchases: PurchaseService,
}

impl Ledger {
    pub fn new(policy: ItemChangePolicy) -> Self {
        let db = Storage::in_memory();
        Self {
            products: ProductService::new(db.clone()),
            sales: SalesService::new(db.clone(), policy),
            purchases: PurchaseService::new(db.clone(), policy),
            db,
        }
    }

    pub async fn product(&self, sku: &str, quantity: i64, price: &str) -> Product {
        self.products
            .create(product_input(sku, quantity, price))
            .await
            .unwrap()
    }

    pub async fn quantity(&self, product: &Product) -> i64 {
        self.products.get(product.id).await.unwrap().quantity
    }
}

pub fn product_input(sku: &str, quantity: i64, price: &str) -> CreateProductInput {
    CreateProductInput {
        sku: sku.to_string(),
        name: format!("Product {}", sku),
        description: String::new(),
        category: "Electronics".to_string(),
        item_type: None,
        subcategory: None,
        quantity,
        reorder_level: None,
        price: dec(price),
        image_url: None,
        barcode: None,
    }
}

/// Order line for `product` priced at its catalog price
pub fn item(product: &Product, quantity: i64) -> OrderItem {
    OrderItem {
        product_id: product.id,
        name: product.name.clone(),
        quantity,
        price_usd: product.price,
    }
}

pub fn sales_draft(items: Vec<OrderItem>) -> SalesOrderDraft {
    SalesOrderDraft {
        customer_id: Uuid::new_v4(),
        customer_name: Some("Walk-in Customer".to_string()),
        items,
        order_date: Some(date(2024, 5, 1)),
        exchange_rate: None,
        payment_status: PaymentStatus::Unpaid,
    }
}

pub fn purchase_draft(items: Vec<OrderItem>, shipping_status: ShippingStatus) -> PurchaseOrderDraft {
    PurchaseOrderDraft {
        supplier_id: Uuid::new_v4(),
        supplier_name: Some("Addis Wholesale".to_string()),
        items,
        order_date: Some(date(2024, 5, 1)),
        status: PurchaseStatus::Pending,
        shipping_status,
        exchange_rate: None,
        payment_status: PaymentStatus::Unpaid,
    }
}
