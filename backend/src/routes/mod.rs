//! Route definitions for the Inventory Ledger platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes(state.clone()))
        // Protected business routes
        .merge(protected_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/customers", customer_routes())
        .nest("/sales-orders", sales_order_routes())
        .nest("/purchase-orders", purchase_order_routes())
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route("/dashboard", get(handlers::get_dashboard))
        .route(
            "/import-export/products",
            get(handlers::export_products).post(handlers::import_products),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/generate-sku", get(handlers::generate_sku))
        .route("/sku/:sku", get(handlers::get_product_by_sku))
        .route("/barcode/:code", get(handlers::get_product_by_barcode))
        .route(
            "/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:id/stock", post(handlers::adjust_stock))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
}

fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/:id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
}

/// Sales side of the ledger
fn sales_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_sales_orders).post(handlers::create_sales_order),
        )
        .route(
            "/:id",
            get(handlers::get_sales_order)
                .put(handlers::update_sales_order)
                .delete(handlers::delete_sales_order),
        )
}

/// Purchase side of the ledger
fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchase_orders).post(handlers::create_purchase_order),
        )
        .route(
            "/:id",
            get(handlers::get_purchase_order)
                .put(handlers::update_purchase_order)
                .delete(handlers::delete_purchase_order),
        )
}
