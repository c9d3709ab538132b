use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::repository::RepositoryError;

use super::domain::{ListingDraft, ListingFilter, ListingId, ListingUpdate};
use super::repository::ListingRepository;
use super::service::{MarketplaceService, MarketplaceServiceError};

/// Router builder exposing the marketplace registry over HTTP.
pub fn marketplace_router<R>(service: Arc<MarketplaceService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/marketplace/listings",
            post(create_listing_handler::<R>).get(list_listings_handler::<R>),
        )
        .route(
            "/api/v1/marketplace/listings/:listing_id",
            get(listing_handler::<R>)
                .patch(update_listing_handler::<R>)
                .delete(delete_listing_handler::<R>),
        )
        .route(
            "/api/v1/marketplace/listings/:listing_id/purchase",
            post(purchase_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingsQuery {
    #[serde(default)]
    pub(crate) farmer_id: Option<String>,
    #[serde(default)]
    pub(crate) available: Option<bool>,
    #[serde(default)]
    pub(crate) q: Option<String>,
    #[serde(default)]
    pub(crate) type_of_good: Option<String>,
    #[serde(default)]
    pub(crate) condition: Option<String>,
    #[serde(default)]
    pub(crate) location: Option<String>,
    #[serde(default)]
    pub(crate) max_price: Option<u32>,
    #[serde(default)]
    pub(crate) min_quantity: Option<f64>,
}

impl ListingsQuery {
    fn filter(&self) -> ListingFilter {
        ListingFilter {
            type_of_good: self.type_of_good.clone(),
            condition: self.condition.clone(),
            location: self.location.clone(),
            max_price: self.max_price,
            min_quantity: self.min_quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PurchaseBody {
    pub(crate) buyer_id: String,
}

pub(crate) async fn create_listing_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    axum::Json(draft): axum::Json<ListingDraft>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.create_listing(draft) {
        Ok(listing) => (StatusCode::CREATED, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_listings_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    Query(query): Query<ListingsQuery>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let filter = query.filter();
    let result = if let Some(farmer_id) = query.farmer_id.as_deref() {
        service.listings_for_farmer(farmer_id)
    } else if let Some(needle) = query.q.as_deref() {
        service.search_listings(needle)
    } else if !filter.is_empty() {
        service.filter_listings(&filter)
    } else if query.available.unwrap_or(false) {
        service.available_listings()
    } else {
        service.all_listings()
    };

    match result {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn listing_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.listing(&ListingId(listing_id)) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_listing_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    Path(listing_id): Path<String>,
    axum::Json(update): axum::Json<ListingUpdate>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.update_listing(&ListingId(listing_id), update) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_listing_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.delete_listing(&ListingId(listing_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn purchase_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    Path(listing_id): Path<String>,
    axum::Json(body): axum::Json<PurchaseBody>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.purchase_listing(&ListingId(listing_id), &body.buyer_id) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: MarketplaceServiceError) -> Response {
    let status = match &err {
        MarketplaceServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MarketplaceServiceError::Repository(RepositoryError::Conflict)
        | MarketplaceServiceError::NotAvailable { .. } => StatusCode::CONFLICT,
        MarketplaceServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
