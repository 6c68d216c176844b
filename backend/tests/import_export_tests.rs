//! CSV import/export tests

mod common;

use common::*;
use inventory_backend::services::{ImportExportService, ProductService};
use inventory_backend::Storage;

fn services() -> (ImportExportService, ProductService) {
    let db = Storage::in_memory();
    (ImportExportService::new(db.clone()), ProductService::new(db))
}

#[tokio::test]
async fn test_import_creates_products() {
    let (csv, products) = services();
    let data = "\
name,sku,category,quantity,price,description,imageUrl,barcode
Teff Flour,TF-1,Groceries,40,3.25,Ivory teff,,
Berbere,BB-2,Groceries,12,4.00,,https://img.example/bb.png,6001234567890
";

    let report = csv.import_products(data).await.unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 0);
    assert!(report.errors.is_empty());

    let teff = products.find_by_sku("TF-1").await.unwrap().unwrap();
    assert_eq!(teff.quantity, 40);
    assert_eq!(teff.price, dec("3.25"));
    assert_eq!(teff.description, "Ivory teff");
    assert_eq!(teff.image_url, None);

    let berbere = products.find_by_barcode("6001234567890").await.unwrap();
    assert_eq!(berbere.map(|p| p.sku), Some("BB-2".to_string()));
}

#[tokio::test]
async fn test_import_skips_bad_and_duplicate_rows() {
    let (csv, products) = services();
    products.create(product_input("OLD-1", 1, "1")).await.unwrap();

    let data = "\
name,sku,category,quantity,price
Existing,OLD-1,Groceries,1,1
,NO-NAME,Groceries,1,1
Lentils,LN-1,Groceries,lots,1
Lentils,LN-1,Groceries,5,1.5
Lentils again,LN-1,Groceries,5,1.5
Coffee,CF-1,Groceries,-2,1
";

    let report = csv.import_products(data).await.unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 5);
    assert_eq!(report.errors.len(), 5);
    assert!(report.errors[0].starts_with("Row 2:"));
    assert!(report.errors[0].contains("OLD-1"));
    assert!(report.errors[1].contains("name"));
    assert!(report.errors[2].contains("quantity"));
    assert!(report.errors[3].starts_with("Row 6:"));
    assert!(report.errors[4].contains("negative"));

    assert_eq!(products.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_export_then_import_into_empty_catalog() {
    let (csv, products) = services();
    let mut input = product_input("A1", 7, "2.50");
    input.barcode = Some("111".to_string());
    products.create(input).await.unwrap();
    products.create(product_input("B2", 0, "10")).await.unwrap();

    let exported = csv.export_products().await.unwrap();
    assert!(exported.starts_with("id,sku,name,description,category,quantity,price,imageUrl,barcode"));
    assert_eq!(exported.lines().count(), 3);

    let (fresh, fresh_products) = services();
    let report = fresh.import_products(&exported).await.unwrap();
    assert_eq!(report.imported, 2);

    let a1 = fresh_products.find_by_sku("A1").await.unwrap().unwrap();
    assert_eq!(a1.quantity, 7);
    assert_eq!(a1.barcode.as_deref(), Some("111"));
}

#[tokio::test]
async fn test_header_only_imports_nothing() {
    let (csv, _) = services();
    let report = csv
        .import_products("name,sku,category,quantity,price\n")
        .await
        .unwrap();
    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 0);
}

#[tokio::test]
async fn test_export_empty_catalog_is_header_only() {
    let (csv, _) = services();
    let exported = csv.export_products().await.unwrap();
    assert_eq!(exported.lines().count(), 1);
}
