//! Dashboard aggregation tests

mod common;

use common::*;
use inventory_backend::config::ItemChangePolicy;
use inventory_backend::services::product::UpdateProductInput;
use inventory_backend::services::DashboardService;
use inventory_backend::AppError;
use shared::{DateRange, OrderKind, ShippingStatus};

async fn seeded() -> Ledger {
    let ledger = Ledger::new(ItemChangePolicy::Preserve);

    let teff = ledger.product("TF-1", 50, "2").await;
    let coffee = ledger.product("CF-1", 20, "10").await;
    let honey = ledger.product("HN-1", 3, "5").await;
    ledger.product("SP-1", 0, "1").await;

    ledger
        .products
        .update(
            honey.id,
            UpdateProductInput {
                reorder_level: Some(5),
                category: Some("Health & Beauty".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut march = sales_draft(vec![item(&teff, 10), item(&coffee, 1)]);
    march.order_date = Some(date(2024, 3, 10));
    ledger.sales.create(march).await.unwrap();

    let mut april = sales_draft(vec![item(&coffee, 2)]);
    april.order_date = Some(date(2024, 4, 2));
    ledger.sales.create(april).await.unwrap();

    let mut restock = purchase_draft(vec![item(&teff, 5)], ShippingStatus::Received);
    restock.order_date = Some(date(2024, 4, 5));
    ledger.purchases.create(restock).await.unwrap();

    ledger
}

#[tokio::test]
async fn test_totals_and_stock_counts() {
    let ledger = seeded().await;
    let summary = DashboardService::new(ledger.db.clone())
        .summary(DateRange::all())
        .await
        .unwrap();

    // 10 x 2 + 1 x 10 + 2 x 10
    assert_eq!(summary.total_sales, dec("50"));
    assert_eq!(summary.total_purchases, dec("10"));
    assert_eq!(summary.low_stock_items, 1);
    assert_eq!(summary.out_of_stock_items, 1);
    assert_eq!(summary.low_stock_products[0].sku, "HN-1");
}

#[tokio::test]
async fn test_range_filters_orders_inclusively() {
    let ledger = seeded().await;
    let service = DashboardService::new(ledger.db.clone());

    let april = service
        .summary(DateRange::new(Some(date(2024, 4, 2)), Some(date(2024, 4, 30))))
        .await
        .unwrap();
    assert_eq!(april.total_sales, dec("20"));
    assert_eq!(april.total_purchases, dec("10"));
    assert_eq!(april.top_products.len(), 1);
    assert_eq!(april.daily_totals.len(), 2);

    // Recent activity ignores the range
    assert_eq!(april.recent_activity.len(), 3);
    assert_eq!(april.recent_activity[0].kind, OrderKind::Purchase);
    assert_eq!(april.recent_activity[0].order_date, date(2024, 4, 5));
}

#[tokio::test]
async fn test_top_products_by_quantity() {
    let ledger = seeded().await;
    let summary = DashboardService::new(ledger.db.clone())
        .summary(DateRange::all())
        .await
        .unwrap();

    let top: Vec<(&str, i64)> = summary
        .top_products
        .iter()
        .map(|p| (p.name.as_str(), p.quantity))
        .collect();
    assert_eq!(top, vec![("Product TF-1", 10), ("Product CF-1", 3)]);
}

#[tokio::test]
async fn test_category_distribution() {
    let ledger = seeded().await;
    let summary = DashboardService::new(ledger.db.clone())
        .summary(DateRange::all())
        .await
        .unwrap();

    let counts: Vec<(&str, usize)> = summary
        .category_distribution
        .iter()
        .map(|c| (c.category.as_str(), c.count))
        .collect();
    assert_eq!(counts, vec![("Electronics", 3), ("Health & Beauty", 1)]);
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let ledger = Ledger::new(ItemChangePolicy::Preserve);
    let err = DashboardService::new(ledger.db.clone())
        .summary(DateRange::new(Some(date(2024, 5, 1)), Some(date(2024, 4, 1))))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}
