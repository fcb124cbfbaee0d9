//! Handler tests for Products domain
//!
//! These tests drive the products router directly with `oneshot()`:
//! - Request deserialization and validation
//! - Response serialization
//! - HTTP status codes
//! - Error bodies
//!
//! Routing under `/api/v1/products`, health and docs are covered by the app.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app(repo: &InMemoryProductRepository) -> Router {
    handlers::router(ProductService::new(repo.clone()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_returns_seeded_catalogue() {
    let repo = InMemoryProductRepository::with_sample_data();

    let response = app(&repo).oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 10);
    assert!(products.iter().any(|p| p.id == "1" && p.name == "Laptop"));
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let repo = InMemoryProductRepository::new();

    let response = app(&repo).oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_product_returns_record() {
    let repo = InMemoryProductRepository::with_sample_data();

    let response = app(&repo).oneshot(empty_request("GET", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "id": "1",
            "name": "Laptop",
            "description": "High-performance laptop for professional use",
            "price": 1299.99,
            "quantity": 15
        })
    );
}

#[tokio::test]
async fn test_get_unknown_product_returns_404() {
    let repo = InMemoryProductRepository::with_sample_data();

    let response = app(&repo)
        .oneshot(empty_request("GET", "/nonexistent"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Product nonexistent not found");
}

#[tokio::test]
async fn test_create_product_returns_201_with_generated_id() {
    let repo = InMemoryProductRepository::with_sample_data();

    let request = json_request(
        "POST",
        "/",
        json!({
            "id": "client-chosen",
            "name": "Wireless Headphones",
            "description": "Noise-cancelling over-ear headphones",
            "price": 249.99,
            "quantity": 50
        }),
    );
    let response = app(&repo).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_ne!(product.id, "client-chosen");
    assert!(uuid::Uuid::parse_str(&product.id).is_ok());
    assert_eq!(product.price, Decimal::new(24999, 2));

    assert_eq!(repo.count().await, 11);
    assert_eq!(repo.get(&product.id).await, Some(product));
}

#[tokio::test]
async fn test_create_twice_yields_distinct_ids() {
    let repo = InMemoryProductRepository::new();
    let body = json!({ "name": "Cable", "price": 9.99, "quantity": 1 });

    let first: Product = json_body(
        app(&repo)
            .oneshot(json_request("POST", "/", body.clone()))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    let second: Product = json_body(
        app(&repo)
            .oneshot(json_request("POST", "/", body))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    assert_ne!(first.id, second.id);
    assert_eq!(repo.count().await, 2);
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let repo = InMemoryProductRepository::with_sample_data();

    let request = json_request(
        "POST",
        "/",
        json!({ "name": "", "price": -10, "quantity": -5 }),
    );
    let response = app(&repo).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["name"][0]["message"], "Product name is required");
    assert_eq!(body["details"]["price"][0]["message"], "Price must be greater than 0");
    assert!(body["details"]["quantity"].is_array());

    assert_eq!(repo.count().await, 10);
}

#[tokio::test]
async fn test_create_with_missing_field_returns_400() {
    let repo = InMemoryProductRepository::new();

    let request = json_request("POST", "/", json!({ "name": "Cable", "quantity": 1 }));
    let response = app(&repo).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
    assert_eq!(repo.count().await, 0);
}

#[tokio::test]
async fn test_create_with_malformed_json_returns_400() {
    let repo = InMemoryProductRepository::new();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let repo = InMemoryProductRepository::with_sample_data();

    let request = json_request(
        "PUT",
        "/1",
        json!({
            "id": "999",
            "name": "Gaming Laptop",
            "price": 1999.99,
            "quantity": 5
        }),
    );
    let response = app(&repo).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(
        product,
        Product {
            id: "1".to_string(),
            name: "Gaming Laptop".to_string(),
            description: None,
            price: Decimal::new(199999, 2),
            quantity: 5,
        }
    );
    assert!(!repo.exists("999").await);
    assert_eq!(repo.get("1").await, Some(product));
}

#[tokio::test]
async fn test_update_unknown_product_returns_404_without_inserting() {
    let repo = InMemoryProductRepository::with_sample_data();

    let request = json_request(
        "PUT",
        "/nonexistent",
        json!({ "name": "Ghost", "price": 1.0, "quantity": 1 }),
    );
    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!repo.exists("nonexistent").await);
    assert_eq!(repo.count().await, 10);
}

#[tokio::test]
async fn test_update_with_invalid_body_leaves_record_untouched() {
    let repo = InMemoryProductRepository::with_sample_data();
    let before = repo.get("1").await;

    let request = json_request(
        "PUT",
        "/1",
        json!({ "name": "  ", "price": 10.0, "quantity": 1 }),
    );
    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repo.get("1").await, before);
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let repo = InMemoryProductRepository::with_sample_data();

    let request = json_request("PATCH", "/1", json!({ "quantity": 20 }));
    let response = app(&repo).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.quantity, 20);
    assert_eq!(product.name, "Laptop");
    assert_eq!(product.price, Decimal::new(129999, 2));
    assert_eq!(
        product.description.as_deref(),
        Some("High-performance laptop for professional use")
    );
}

#[tokio::test]
async fn test_patch_with_nulls_and_empty_body_changes_nothing() {
    let repo = InMemoryProductRepository::with_sample_data();
    let before = repo.get("2").await;

    for body in [json!({}), json!({ "name": null, "price": null })] {
        let response = app(&repo)
            .oneshot(json_request("PATCH", "/2", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(repo.get("2").await, before);
}

#[tokio::test]
async fn test_patch_rejects_non_positive_price() {
    let repo = InMemoryProductRepository::with_sample_data();

    let response = app(&repo)
        .oneshot(json_request("PATCH", "/1", json!({ "price": 0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repo.get("1").await.unwrap().price, Decimal::new(129999, 2));
}

#[tokio::test]
async fn test_patch_unknown_product_returns_404() {
    let repo = InMemoryProductRepository::with_sample_data();

    let response = app(&repo)
        .oneshot(json_request("PATCH", "/nonexistent", json!({ "quantity": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(repo.count().await, 10);
}

#[tokio::test]
async fn test_delete_returns_204_and_removes_record() {
    let repo = InMemoryProductRepository::with_sample_data();

    let response = app(&repo)
        .oneshot(empty_request("DELETE", "/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!repo.exists("1").await);

    let response = app(&repo).oneshot(empty_request("GET", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_product_returns_204() {
    let repo = InMemoryProductRepository::with_sample_data();

    let response = app(&repo)
        .oneshot(empty_request("DELETE", "/nonexistent"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(repo.count().await, 10);
}

#[tokio::test]
async fn test_openapi_document_lists_all_operations() {
    use utoipa::OpenApi;

    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let paths = doc["paths"].as_object().unwrap();

    let item = &paths["/{id}"];
    for method in ["get", "put", "patch", "delete"] {
        assert!(item.get(method).is_some(), "missing {method} on /{{id}}");
    }
    assert!(doc["components"]["schemas"].get("ProductRequest").is_some());
}
