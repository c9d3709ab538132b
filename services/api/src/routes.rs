use crate::infra::AppState;
use agrilink::accounts::{auth_router, AccountService, UserRepository};
use agrilink::marketplace::{marketplace_router, ListingRepository, MarketplaceService};
use agrilink::transport::{transport_router, TransportRepository, TransportService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn api_routes<T, L, U>(
    transport: Arc<TransportService<T>>,
    marketplace: Arc<MarketplaceService<L>>,
    accounts: Arc<AccountService<U>>,
) -> axum::Router
where
    T: TransportRepository + 'static,
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    transport_router(transport)
        .merge(marketplace_router(marketplace))
        .merge(auth_router(accounts))
        .route("/api/hello", axum::routing::get(hello_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn hello_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from the AgriLink backend!" }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
