//! HTTP API tests
//!
//! Drive the full router with `tower::ServiceExt::oneshot` over an in-memory
//! store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use inventory_backend::{create_app, AppState, Config, Storage};

fn app() -> Router {
    create_app(AppState::new(Storage::in_memory(), Config::ephemeral()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn signed_in(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Store Owner",
            "email": "owner@example.com",
            "password": "secret1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "available");
}

#[tokio::test]
async fn test_business_routes_require_token() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, body) = send(&app, "GET", "/api/v1/products", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_me_returns_signed_in_user() {
    let app = app();
    let token = signed_in(&app).await;

    let (status, body) = send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "owner@example.com");
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_sales_flow_over_http() {
    let app = app();
    let token = signed_in(&app).await;

    let (status, product) = send(
        &app,
        "POST",
        "/api/v1/products",
        Some(&token),
        Some(json!({
            "sku": "A1",
            "name": "Widget",
            "category": "Electronics",
            "quantity": 10,
            "price": "5"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = product["id"].as_str().unwrap().to_string();

    let order_body = |quantity: i64| {
        json!({
            "customerId": "6f1c1f44-3f3a-4a57-9d76-2b6a5a0c3f10",
            "customerName": "Walk-in",
            "items": [{
                "productId": product_id,
                "name": "Widget",
                "quantity": quantity,
                "priceUSD": "5"
            }],
            "orderDate": "2024-05-01"
        })
    };

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/sales-orders",
        Some(&token),
        Some(order_body(11)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_STOCK");
    assert_eq!(
        body["error"]["message"],
        "Not enough stock for Widget. Available: 10, Requested: 11."
    );

    let (status, order) = send(
        &app,
        "POST",
        "/api/v1/sales-orders",
        Some(&token),
        Some(order_body(7)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["totalAmountUSD"], "35");

    let uri = format!("/api/v1/products/{}", product_id);
    let (_, product) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(product["quantity"], 3);

    let order_uri = format!("/api/v1/sales-orders/{}", order["id"].as_str().unwrap());
    let (status, _) = send(&app, "DELETE", &order_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, product) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(product["quantity"], 10);
}

#[tokio::test]
async fn test_duplicate_sku_over_http() {
    let app = app();
    let token = signed_in(&app).await;
    let body = json!({
        "sku": "A1",
        "name": "Widget",
        "category": "Electronics",
        "quantity": 1,
        "price": "1"
    });

    let (status, _) = send(&app, "POST", "/api/v1/products", Some(&token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = send(&app, "POST", "/api/v1/products", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"]["code"], "DUPLICATE_SKU");
    assert_eq!(err["error"]["field"], "sku");
}

#[tokio::test]
async fn test_missing_order_is_404() {
    let app = app();
    let token = signed_in(&app).await;
    let (status, body) = send(
        &app,
        "DELETE",
        "/api/v1/purchase-orders/6f1c1f44-3f3a-4a57-9d76-2b6a5a0c3f10",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_settings_and_categories() {
    let app = app();
    let token = signed_in(&app).await;

    let (status, categories) = send(&app, "GET", "/api/v1/categories", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories.as_array().unwrap().len(), 6);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/settings",
        Some(&token),
        Some(json!({ "exchangeRateUSD_ETB": "0" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "exchangeRateUSD_ETB");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/settings",
        Some(&token),
        Some(json!({ "exchangeRateUSD_ETB": "130" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, settings) = send(&app, "GET", "/api/v1/settings", Some(&token), None).await;
    assert_eq!(settings["exchangeRateUSD_ETB"], "130");
}

#[tokio::test]
async fn test_csv_export_headers() {
    let app = app();
    let token = signed_in(&app).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/import-export/products")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8(bytes.to_vec())
        .unwrap()
        .starts_with("id,sku,name"));
}
