//! API Integration Tests
//!
//! Drive the full router against the in-memory store.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use stock_summary::api::{self, middleware::REQUEST_ID_HEADER};
use stock_summary::store::InMemoryProductStore;
use stock_summary::summary::SummaryService;

mod common;

fn app() -> Router {
    let store = InMemoryProductStore::from_documents(&common::sample_documents());
    api::build_app(SummaryService::new(store.into()))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_aggregate_endpoint_worked_example() {
    let payload = json!({
        "records": [
            { "id": "a", "provider": "p", "quantity": 2, "purchaseValue": 10, "saleValue": 15, "profitValue": 5, "sold": true },
            { "id": "b", "provider": "p", "quantity": 1, "purchaseValue": 4, "saleValue": 6, "profitValue": 2, "sold": false }
        ]
    });

    let (status, body) = post_json(&app(), "/api/v1/aggregate", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total_quantity": 3,
            "total_purchase_value": "14.00",
            "total_sale_value": "21.00",
            "total_profit_value": "7.00",
            "total_quantity_sold": 2,
            "total_sale_value_sold": "15.00",
            "total_quantity_in_stock": 1,
            "total_sale_value_in_stock": "6.00"
        })
    );
}

#[tokio::test]
async fn test_aggregate_endpoint_empty_and_malformed() {
    let (status, body) = post_json(&app(), "/api/v1/aggregate", json!({ "records": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_quantity"], 0);
    assert_eq!(body["total_sale_value"], "0.00");

    let payload = json!({
        "records": [
            { "id": "x", "provider": "p", "quantity": "many", "saleValue": "free", "sold": true }
        ]
    });
    let (status, body) = post_json(&app(), "/api/v1/aggregate", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_quantity"], 0);
    assert_eq!(body["total_sale_value_sold"], "0.00");
}

#[tokio::test]
async fn test_aggregate_endpoint_extreme_values() {
    let payload = json!({
        "records": [
            { "id": "a", "provider": "p", "quantity": "18446744073709551615", "saleValue": "79228162514264337593543950335" },
            { "id": "b", "provider": "p", "quantity": 1, "saleValue": "79228162514264337593543950335" },
            { "id": "c", "provider": "p", "quantity": 1e30, "saleValue": 1e30, "sold": true }
        ]
    });

    let (status, body) = post_json(&app(), "/api/v1/aggregate", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_quantity"], u64::MAX);
    assert_eq!(body["total_quantity_in_stock"], u64::MAX);
    assert_eq!(body["total_quantity_sold"], 0);
    assert!(body["total_sale_value"]
        .as_str()
        .unwrap()
        .starts_with("79228162514264337593543950335"));
    assert_eq!(body["total_sale_value_sold"], "0.00");
}

#[tokio::test]
async fn test_aggregate_endpoint_unassigned_filter() {
    let payload = json!({
        "records": [
            { "id": "a", "provider": "p", "quantity": 1, "seller": null },
            { "id": "b", "provider": "p", "quantity": 4, "seller": "none" }
        ],
        "filter": { "seller": "unassigned" }
    });

    let (status, body) = post_json(&app(), "/api/v1/aggregate", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_quantity"], 1);
}

#[tokio::test]
async fn test_aggregate_endpoint_rejects_missing_provider() {
    let payload = json!({
        "records": [
            { "id": "a", "provider": "p" },
            { "id": "b", "quantity": 1 }
        ]
    });

    let (status, body) = post_json(&app(), "/api/v1/aggregate", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_record");
    assert_eq!(body["details"], "records[1] (b)");
}

#[tokio::test]
async fn test_product_listing_totals() {
    let (status, body) = get_json(&app(), "/api/v1/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 4);

    let totals = &body["totals"];
    assert_eq!(totals["total_quantity"], 8);
    assert_eq!(totals["total_purchase_value"], "17.50");
    assert_eq!(totals["total_sale_value"], "37.00");
    assert_eq!(totals["total_profit_value"], "19.50");
    assert_eq!(totals["total_quantity_sold"], 2);
    assert_eq!(totals["total_sale_value_sold"], "24.00");
    assert_eq!(totals["total_quantity_in_stock"], 6);
    assert_eq!(totals["total_sale_value_in_stock"], "13.00");
}

#[tokio::test]
async fn test_product_summary_with_filters() {
    let app = app();

    let (_, body) = get_json(&app, "/api/v1/products/summary?q=shirt").await;
    assert_eq!(body["total_quantity"], 3);

    let (_, body) = get_json(&app, "/api/v1/products/summary?unassigned_seller=true").await;
    assert_eq!(body["total_quantity"], 1);
    assert_eq!(body["total_sale_value"], "6.00");

    let (_, body) = get_json(&app, "/api/v1/products/summary?seller=none").await;
    assert_eq!(body["total_quantity"], 5);

    let (_, body) = get_json(&app, "/api/v1/products/summary?provider=shopping-b&q=jn-7").await;
    assert_eq!(body["total_quantity"], 5);
    assert_eq!(body["total_profit_value"], "3.50");

    let (_, body) = get_json(&app, "/api/v1/products/summary?q=nothing-matches").await;
    assert_eq!(body["total_quantity"], 0);
    assert_eq!(body["total_sale_value"], "0.00");
}

#[tokio::test]
async fn test_conflicting_seller_filter() {
    let (status, body) = get_json(&app(), "/api/v1/products?seller=ana&unassigned_seller=true").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_request");
    assert_eq!(body["details"], "Seller id and unassigned seller cannot be combined");
}

#[tokio::test]
async fn test_get_product() {
    let app = app();

    let (status, body) = get_json(&app, "/api/v1/products/p-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "shopping-b");
    assert_eq!(body["seller"], "none");

    let (status, body) = get_json(&app, "/api/v1/products/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "product_not_found");
}

#[tokio::test]
async fn test_seller_summary() {
    let (status, body) = get_json(&app(), "/api/v1/sellers/ana/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seller_id"], "ana");
    assert_eq!(body["product_count"], 2);
    assert_eq!(body["totals"]["total_quantity_sold"], 2);
    assert_eq!(body["totals"]["total_sale_value_sold"], "24.00");
    assert_eq!(body["totals"]["total_quantity_in_stock"], 0);
}

#[tokio::test]
async fn test_purchase_summary() {
    let (status, body) = get_json(&app(), "/api/v1/purchases/buy-1/summary?q=linen").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["purchase_id"], "buy-1");
    assert_eq!(body["product_count"], 1);
    assert_eq!(body["totals"]["total_purchase_value"], "10.00");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let id = uuid::Uuid::new_v4().to_string();
    let req = Request::builder()
        .uri("/api/v1/products/summary")
        .header(REQUEST_ID_HEADER, &id)
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], id.as_str());
}
