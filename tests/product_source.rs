//! Integration tests for the HTTP product source
//!
//! Each test starts a local product API on an ephemeral port and points an
//! `HttpProductSource` at it.

use axum::{http::StatusCode, routing::get, Json, Router};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use storefront::catalog::errors::CatalogError;
use storefront::catalog::source::{HttpProductSource, ProductSource, SourceError};
use storefront::catalog::store::{Catalog, CatalogOrigin, LoadStatus};

const PRODUCTS_PATH: &str = "/api/all/product/get";

/// Serves `router` on 127.0.0.1 and returns the product endpoint URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}{PRODUCTS_PATH}")
}

fn source(url: &str) -> HttpProductSource {
    HttpProductSource::new(url, Duration::from_secs(5)).unwrap()
}

async fn products_upstream() -> String {
    let router = Router::new().route(
        PRODUCTS_PATH,
        get(|| async {
            Json(json!({
                "status": true,
                "data": [
                    {
                        "id": 1001,
                        "name": "Linen Panjabi",
                        "price": "1450.00",
                        "thumbnail": "panjabi.jpg",
                        "stock_status": "in_stock",
                        "category_name": "Clothing",
                        "video_url": null
                    },
                    { "name": "record without id" },
                    {
                        "id": 1002,
                        "name": "Cotton Saree",
                        "price": 2200
                    }
                ]
            }))
        }),
    );
    spawn_upstream(router).await
}

#[tokio::test]
async fn test_fetch_all_decodes_records() {
    let url = products_upstream().await;

    let products = source(&url).fetch_all().await.unwrap();

    assert_eq!(products.len(), 2, "undecodable records are skipped");
    assert_eq!(products[0].id, 1001);
    assert_eq!(products[0].name, "Linen Panjabi");
    assert_eq!(products[0].price, Some(Decimal::from(1450)));
    assert_eq!(products[1].name, "Cotton Saree");
}

#[tokio::test]
async fn test_fetch_all_error_status() {
    let router = Router::new().route(
        PRODUCTS_PATH,
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_upstream(router).await;

    let result = source(&url).fetch_all().await;

    assert!(matches!(result, Err(SourceError::Status(500))));
}

#[tokio::test]
async fn test_fetch_all_invalid_json() {
    let router = Router::new().route(PRODUCTS_PATH, get(|| async { "<html>maintenance</html>" }));
    let url = spawn_upstream(router).await;

    let result = source(&url).fetch_all().await;

    assert!(matches!(result, Err(SourceError::Decode(_))));
}

#[tokio::test]
async fn test_fetch_all_missing_data() {
    let router = Router::new().route(
        PRODUCTS_PATH,
        get(|| async { Json(json!({ "status": true, "data": [] })) }),
    );
    let url = spawn_upstream(router).await;

    let products = source(&url).fetch_all().await.unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn test_fetch_all_unreachable() {
    // Bind and immediately release a port so nothing is listening on it.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = source(&format!("http://{addr}{PRODUCTS_PATH}"))
        .fetch_all()
        .await;

    assert!(matches!(result, Err(SourceError::Http(_))));
}

#[tokio::test]
async fn test_catalog_over_http() {
    let url = products_upstream().await;
    let catalog = Catalog::new(Arc::new(source(&url)));

    let store = catalog.load_all().await;
    assert_eq!(store.status(), LoadStatus::Succeeded);
    assert_eq!(store.origin(), Some(CatalogOrigin::Remote));
    assert_eq!(store.items().len(), 2);

    let product = catalog.load_by_id("1002").await.unwrap();
    assert_eq!(product.name, "Cotton Saree");

    // Fallback products stay reachable by id.
    let product = catalog.load_by_id("4").await.unwrap();
    assert_eq!(product.name, "Stainless Steel Water Bottle");

    let missing = catalog.load_by_id("999").await;
    assert_eq!(missing, Err(CatalogError::NotFound));
    assert_eq!(catalog.snapshot().await.status(), LoadStatus::Failed);
}

#[tokio::test]
async fn test_catalog_falls_back_on_error_status() {
    let router = Router::new().route(
        PRODUCTS_PATH,
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let url = spawn_upstream(router).await;
    let catalog = Catalog::new(Arc::new(source(&url)));

    let store = catalog.load_all().await;

    assert_eq!(store.status(), LoadStatus::Succeeded);
    assert_eq!(store.origin(), Some(CatalogOrigin::Fallback));
    assert_eq!(store.items().len(), 8);
    assert!(store.error().unwrap().contains("503"));
}
