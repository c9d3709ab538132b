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

use super::domain::{
    Location, PaymentMethod, RequestDraft, RequestId, RequestStatus, VehicleDraft, VehicleId,
};
use super::repository::TransportRepository;
use super::service::{TransportService, TransportServiceError};

/// Router builder exposing the transport registry over HTTP.
pub fn transport_router<R>(service: Arc<TransportService<R>>) -> Router
where
    R: TransportRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/transport/requests",
            post(create_request_handler::<R>).get(list_requests_handler::<R>),
        )
        .route(
            "/api/v1/transport/requests/:request_id",
            get(request_handler::<R>),
        )
        .route(
            "/api/v1/transport/requests/:request_id/accept",
            post(accept_handler::<R>),
        )
        .route(
            "/api/v1/transport/requests/:request_id/status",
            post(status_handler::<R>),
        )
        .route(
            "/api/v1/transport/requests/:request_id/cancel",
            post(cancel_handler::<R>),
        )
        .route(
            "/api/v1/transport/vehicles",
            post(add_vehicle_handler::<R>).get(list_vehicles_handler::<R>),
        )
        .route(
            "/api/v1/transport/vehicles/:vehicle_id/availability",
            post(availability_handler::<R>),
        )
        .route(
            "/api/v1/transport/payments",
            post(record_payment_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AcceptBody {
    pub(crate) transporter_id: String,
    pub(crate) vehicle_id: String,
    pub(crate) price: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    pub(crate) status: RequestStatus,
    #[serde(default)]
    pub(crate) location: Option<Location>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityBody {
    pub(crate) available: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentBody {
    pub(crate) request_id: String,
    pub(crate) amount: u32,
    pub(crate) method: PaymentMethod,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RequestsQuery {
    #[serde(default)]
    pub(crate) farmer_id: Option<String>,
    #[serde(default)]
    pub(crate) transporter_id: Option<String>,
    #[serde(default)]
    pub(crate) open: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VehiclesQuery {
    #[serde(default)]
    pub(crate) transporter_id: Option<String>,
}

pub(crate) async fn create_request_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    axum::Json(draft): axum::Json<RequestDraft>,
) -> Response
where
    R: TransportRepository + 'static,
{
    match service.create_request(draft) {
        Ok(request) => (StatusCode::CREATED, axum::Json(request)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_requests_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    Query(query): Query<RequestsQuery>,
) -> Response
where
    R: TransportRepository + 'static,
{
    let result = if let Some(farmer_id) = query.farmer_id.as_deref() {
        service.requests_for_farmer(farmer_id)
    } else if let Some(transporter_id) = query.transporter_id.as_deref() {
        service.requests_for_transporter(transporter_id)
    } else if query.open.unwrap_or(false) {
        service.open_requests()
    } else {
        service.all_requests()
    };

    match result {
        Ok(requests) => (StatusCode::OK, axum::Json(requests)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn request_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    Path(request_id): Path<String>,
) -> Response
where
    R: TransportRepository + 'static,
{
    match service.request(&RequestId(request_id)) {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn accept_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    Path(request_id): Path<String>,
    axum::Json(body): axum::Json<AcceptBody>,
) -> Response
where
    R: TransportRepository + 'static,
{
    let result = service.accept_request(
        &RequestId(request_id),
        &body.transporter_id,
        &VehicleId(body.vehicle_id),
        body.price,
    );
    match result {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    Path(request_id): Path<String>,
    axum::Json(body): axum::Json<StatusBody>,
) -> Response
where
    R: TransportRepository + 'static,
{
    match service.update_status(&RequestId(request_id), body.status, body.location) {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn cancel_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    Path(request_id): Path<String>,
) -> Response
where
    R: TransportRepository + 'static,
{
    match service.cancel_request(&RequestId(request_id)) {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn add_vehicle_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    axum::Json(draft): axum::Json<VehicleDraft>,
) -> Response
where
    R: TransportRepository + 'static,
{
    match service.add_vehicle(draft) {
        Ok(vehicle) => (StatusCode::CREATED, axum::Json(vehicle)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_vehicles_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    Query(query): Query<VehiclesQuery>,
) -> Response
where
    R: TransportRepository + 'static,
{
    let result = match query.transporter_id.as_deref() {
        Some(transporter_id) => service.vehicles_for_transporter(transporter_id),
        None => service.all_vehicles(),
    };
    match result {
        Ok(vehicles) => (StatusCode::OK, axum::Json(vehicles)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn availability_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    Path(vehicle_id): Path<String>,
    axum::Json(body): axum::Json<AvailabilityBody>,
) -> Response
where
    R: TransportRepository + 'static,
{
    match service.set_vehicle_availability(&VehicleId(vehicle_id), body.available) {
        Ok(vehicle) => (StatusCode::OK, axum::Json(vehicle)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn record_payment_handler<R>(
    State(service): State<Arc<TransportService<R>>>,
    axum::Json(body): axum::Json<PaymentBody>,
) -> Response
where
    R: TransportRepository + 'static,
{
    match service.record_payment(&RequestId(body.request_id), body.amount, body.method) {
        Ok(payment) => (StatusCode::CREATED, axum::Json(payment)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: TransportServiceError) -> Response {
    let status = match &err {
        TransportServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        TransportServiceError::Repository(RepositoryError::Conflict)
        | TransportServiceError::IllegalTransition { .. }
        | TransportServiceError::VehicleUnavailable { .. }
        | TransportServiceError::VehicleStillAssigned { .. } => StatusCode::CONFLICT,
        TransportServiceError::CapacityExceeded { .. }
        | TransportServiceError::RefrigerationRequired { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TransportServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
