//! Product catalog service: CRUD, SKU lookups and the stock adjustment primitive

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use shared::{
    validate_price, validate_reorder_level, validate_sku, validate_stock_quantity, Product,
};

use super::stock::StockChanges;
use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage, WriteGuard};

/// Product catalog service
#[derive(Clone)]
pub struct ProductService {
    db: Storage,
    products: Repository<Product>,
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub item_type: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    pub reorder_level: Option<i64>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub barcode: Option<String>,
}

/// Partial product update. Absent fields are left as they are; an empty
/// string clears an optional text field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub sku: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,
    pub item_type: Option<String>,
    pub subcategory: Option<String>,
    pub quantity: Option<i64>,
    pub reorder_level: Option<i64>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub barcode: Option<String>,
}

impl ProductService {
    pub fn new(db: Storage) -> Self {
        let products = db.repository(Collection::Products);
        Self { db, products }
    }

    pub async fn list(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.load_all().await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.products.find(|p| p.id == id).await?)
    }

    /// Get a product, failing with `NotFound` on a miss
    pub async fn get(&self, id: Uuid) -> AppResult<Product> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))
    }

    /// Exact, case-sensitive SKU lookup
    pub async fn find_by_sku(&self, sku: &str) -> AppResult<Option<Product>> {
        Ok(self.products.find(|p| p.sku == sku).await?)
    }

    pub async fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<Product>> {
        Ok(self.products.find(|p| p.has_barcode(barcode)).await?)
    }

    /// Create a product with a fresh id
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;
        validate_sku(&input.sku).map_err(|msg| AppError::validation("sku", msg))?;
        validate_stock_quantity(input.quantity)
            .map_err(|msg| AppError::validation("quantity", msg))?;
        validate_price(input.price).map_err(|msg| AppError::validation("price", msg))?;
        if let Some(level) = input.reorder_level {
            validate_reorder_level(level)
                .map_err(|msg| AppError::validation("reorderLevel", msg))?;
        }

        let _guard = self.db.lock().await;
        let mut products = self.products.load_all().await?;

        if products.iter().any(|p| p.sku == input.sku) {
            return Err(AppError::DuplicateSku(input.sku));
        }

        let product = Product {
            id: Uuid::new_v4(),
            sku: input.sku,
            name: input.name,
            description: input.description,
            category: input.category,
            item_type: non_empty(input.item_type),
            subcategory: non_empty(input.subcategory),
            quantity: input.quantity,
            reorder_level: input.reorder_level,
            price: input.price,
            image_url: non_empty(input.image_url),
            barcode: non_empty(input.barcode),
        };

        products.push(product.clone());
        self.products.save_all(&products).await?;

        info!(product_id = %product.id, sku = %product.sku, "product created");
        Ok(product)
    }

    /// Shallow-merge `input` into an existing product
    pub async fn update(&self, id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        input.validate()?;
        if let Some(sku) = &input.sku {
            validate_sku(sku).map_err(|msg| AppError::validation("sku", msg))?;
        }
        if let Some(quantity) = input.quantity {
            validate_stock_quantity(quantity)
                .map_err(|msg| AppError::validation("quantity", msg))?;
        }
        if let Some(price) = input.price {
            validate_price(price).map_err(|msg| AppError::validation("price", msg))?;
        }
        if let Some(level) = input.reorder_level {
            validate_reorder_level(level)
                .map_err(|msg| AppError::validation("reorderLevel", msg))?;
        }

        let _guard = self.db.lock().await;
        let mut products = self.products.load_all().await?;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Product"))?;

        if let Some(sku) = &input.sku {
            if products.iter().any(|p| p.id != id && &p.sku == sku) {
                return Err(AppError::DuplicateSku(sku.clone()));
            }
        }

        let product = &mut products[index];
        if let Some(sku) = input.sku {
            product.sku = sku;
        }
        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(description) = input.description {
            product.description = description;
        }
        if let Some(category) = input.category {
            product.category = category;
        }
        if input.item_type.is_some() {
            product.item_type = non_empty(input.item_type);
        }
        if input.subcategory.is_some() {
            product.subcategory = non_empty(input.subcategory);
        }
        if let Some(quantity) = input.quantity {
            product.quantity = quantity;
        }
        if input.reorder_level.is_some() {
            product.reorder_level = input.reorder_level;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if input.image_url.is_some() {
            product.image_url = non_empty(input.image_url);
        }
        if input.barcode.is_some() {
            product.barcode = non_empty(input.barcode);
        }

        let updated = product.clone();
        self.products.save_all(&products).await?;
        Ok(updated)
    }

    /// Remove a product. Orders that reference it keep their snapshots.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.db.lock().await;
        let mut products = self.products.load_all().await?;

        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(AppError::not_found("Product"));
        }

        self.products.save_all(&products).await?;
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Add a signed delta to one product's quantity.
    ///
    /// Returns `false` without writing anything if the product does not exist.
    /// A negative delta may not take the product below zero; only reversing a
    /// received purchase can do that.
    pub async fn adjust_stock(&self, id: Uuid, delta: i64) -> AppResult<bool> {
        let guard = self.db.lock().await;
        let Some(product) = self.find_by_id(id).await? else {
            warn!(product_id = %id, delta, "stock adjustment skipped: product not found");
            return Ok(false);
        };
        if delta == 0 {
            return Ok(true);
        }

        let on_hand = product
            .quantity
            .checked_add(delta)
            .ok_or_else(|| quantity_out_of_range(&product))?;
        if delta < 0 && on_hand < 0 {
            return Err(AppError::validation(
                "delta",
                format!(
                    "Adjustment would leave {} below zero (on hand: {})",
                    product.name, product.quantity
                ),
            ));
        }

        let mut changes = StockChanges::new();
        changes.add(id, delta);
        Ok(self.commit_stock(&guard, &changes).await? == 1)
    }

    /// Apply a staged batch of stock changes in a single write.
    ///
    /// The caller must hold the storage write lock. Changes for unknown
    /// products are skipped with a warning. Returns how many changes landed.
    pub async fn commit_stock(
        &self,
        _guard: &WriteGuard<'_>,
        changes: &StockChanges,
    ) -> AppResult<usize> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut products = self.products.load_all().await?;
        let mut applied = 0;

        for adjustment in changes.iter() {
            match products.iter_mut().find(|p| p.id == adjustment.product_id) {
                Some(product) => {
                    product.quantity = product
                        .quantity
                        .checked_add(adjustment.delta)
                        .ok_or_else(|| quantity_out_of_range(product))?;
                    applied += 1;
                }
                None => warn!(
                    product_id = %adjustment.product_id,
                    delta = adjustment.delta,
                    "stock adjustment skipped: product not found"
                ),
            }
        }

        if applied > 0 {
            self.products.save_all(&products).await?;
        }
        Ok(applied)
    }

    /// Generate a SKU of the form `SKU-<6 digits>-<4 upper alphanumerics>`
    pub fn generate_sku() -> String {
        let millis = Utc::now().timestamp_millis().rem_euclid(1_000_000);
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(4)
            .collect::<String>()
            .to_uppercase();
        format!("SKU-{:06}-{}", millis, suffix)
    }

    /// Generate a SKU no existing product uses
    pub async fn generate_unique_sku(&self) -> AppResult<String> {
        let products = self.products.load_all().await?;
        loop {
            let sku = Self::generate_sku();
            if !products.iter().any(|p| p.sku == sku) {
                return Ok(sku);
            }
        }
    }
}

fn quantity_out_of_range(product: &Product) -> AppError {
    AppError::validation(
        "quantity",
        format!("Stock for {} is out of range", product.name),
    )
}

/// Treat blank optional text as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
