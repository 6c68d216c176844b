//! CSV import and export of the product catalog

use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use shared::{Product, PRODUCT_CSV_COLUMNS};

use super::product::{CreateProductInput, ProductService};
use crate::error::{AppError, AppResult};
use crate::store::Storage;

/// CSV import/export service
#[derive(Clone)]
pub struct ImportExportService {
    products: ProductService,
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    /// One reason per skipped row
    pub errors: Vec<String>,
}

/// A raw CSV row. Every column is optional so that missing values can be
/// reported per row instead of failing the whole file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow {
    name: Option<String>,
    sku: Option<String>,
    description: Option<String>,
    category: Option<String>,
    quantity: Option<String>,
    price: Option<String>,
    image_url: Option<String>,
    barcode: Option<String>,
}

impl ImportExportService {
    pub fn new(db: Storage) -> Self {
        Self {
            products: ProductService::new(db),
        }
    }

    /// Import products from CSV text with a header row.
    ///
    /// Rows with missing or malformed required fields, and rows whose SKU is
    /// already taken (including by an earlier row of the same file), are
    /// skipped. Everything else goes through the normal product create.
    pub async fn import_products(&self, data: &str) -> AppResult<ImportReport> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_bytes());

        reader
            .headers()
            .map_err(|e| AppError::validation("file", format!("Unreadable CSV header: {}", e)))?;

        let mut taken: HashSet<String> = self
            .products
            .list()
            .await?
            .into_iter()
            .map(|p| p.sku)
            .collect();

        let mut report = ImportReport::default();

        for (index, row) in reader.deserialize::<ProductRow>().enumerate() {
            // Header is line 1
            let line = index + 2;

            let input = match row
                .map_err(|e| format!("malformed row: {}", e))
                .and_then(parse_row)
            {
                Ok(input) => input,
                Err(reason) => {
                    report.skip(format!("Row {}: {}", line, reason));
                    continue;
                }
            };

            if taken.contains(&input.sku) {
                report.skip(format!(
                    "Row {}: SKU {} already exists",
                    line, input.sku
                ));
                continue;
            }

            let sku = input.sku.clone();
            match self.products.create(input).await {
                Ok(_) => {
                    taken.insert(sku);
                    report.imported += 1;
                }
                Err(
                    e @ (AppError::Validation { .. } | AppError::DuplicateSku(_)),
                ) => report.skip(format!("Row {}: {}", line, e)),
                Err(e) => return Err(e),
            }
        }

        info!(
            imported = report.imported,
            skipped = report.skipped,
            "product CSV import finished"
        );
        Ok(report)
    }

    /// Export every product as CSV with a fixed column order
    pub async fn export_products(&self) -> AppResult<String> {
        let products = self.products.list().await?;
        write_products_csv(&products)
    }
}

impl ImportReport {
    fn skip(&mut self, reason: String) {
        warn!("{}", reason);
        self.skipped += 1;
        self.errors.push(reason);
    }
}

fn parse_row(row: ProductRow) -> Result<CreateProductInput, String> {
    let name = required(row.name, "name")?;
    let sku = required(row.sku, "sku")?;
    let category = required(row.category, "category")?;
    let quantity = required(row.quantity, "quantity")?;
    let price = required(row.price, "price")?;

    let quantity = quantity
        .parse::<i64>()
        .map_err(|_| format!("quantity \"{}\" is not a whole number", quantity))?;
    let price =
        Decimal::from_str(&price).map_err(|_| format!("price \"{}\" is not a number", price))?;

    Ok(CreateProductInput {
        sku,
        name,
        description: row.description.unwrap_or_default(),
        category,
        item_type: None,
        subcategory: None,
        quantity,
        reorder_level: None,
        price,
        image_url: row.image_url,
        barcode: row.barcode,
    })
}

fn required(value: Option<String>, column: &str) -> Result<String, String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("missing required field {}", column))
}

fn write_products_csv(products: &[Product]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let csv_error = |e: csv::Error| AppError::Internal(format!("CSV serialization error: {}", e));

    wtr.write_record(PRODUCT_CSV_COLUMNS).map_err(csv_error)?;
    for p in products {
        wtr.write_record([
            p.id.to_string(),
            p.sku.clone(),
            p.name.clone(),
            p.description.clone(),
            p.category.clone(),
            p.quantity.to_string(),
            p.price.to_string(),
            p.image_url.clone().unwrap_or_default(),
            p.barcode.clone().unwrap_or_default(),
        ])
        .map_err(csv_error)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
}
