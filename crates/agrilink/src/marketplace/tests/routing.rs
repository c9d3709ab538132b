use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::marketplace::router::marketplace_router;

fn build_router() -> axum::Router {
    let (service, _) = build_service();
    marketplace_router(Arc::new(service))
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn post_listing_returns_created_available_record() {
    let router = build_router();

    let response = router
        .oneshot(
            Request::post("/api/v1/marketplace/listings")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&olive_draft()).expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("available")));
}

#[tokio::test]
async fn purchase_route_rejects_a_sold_listing() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let listing = service.create_listing(olive_draft()).expect("created");
    service
        .purchase_listing(&listing.id, "store-3")
        .expect("sold");
    let router = marketplace_router(service);

    let response = router
        .oneshot(
            Request::post(format!(
                "/api/v1/marketplace/listings/{}/purchase",
                listing.id.0
            ))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "buyer_id": "store-9" }).to_string()))
            .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_route_returns_no_content() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let listing = service.create_listing(olive_draft()).expect("created");
    let router = marketplace_router(service);

    let response = router
        .oneshot(
            Request::delete(format!("/api/v1/marketplace/listings/{}", listing.id.0))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn list_route_applies_query_filters() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    service.create_listing(olive_draft()).expect("created");
    service.create_listing(tomato_draft()).expect("created");
    let router = marketplace_router(service);

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/marketplace/listings?max_price=20&min_quantity=30")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].get("type_of_good"), Some(&json!("Tomatoes")));

    let response = router
        .oneshot(
            Request::get("/api/v1/marketplace/listings?q=marrakech")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn patch_route_merges_updates() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let listing = service.create_listing(olive_draft()).expect("created");
    let router = marketplace_router(service);

    let response = router
        .oneshot(
            Request::patch(format!("/api/v1/marketplace/listings/{}", listing.id.0))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "price_per_unit": 42 }).to_string()))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("price_per_unit"), Some(&json!(42)));
    assert_eq!(payload.get("type_of_good"), Some(&json!("Olives")));
}
