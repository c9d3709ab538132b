//! Transport registry: requests to move cargo, the vehicles that fulfill
//! them, and the payments recorded against delivered loads.
//!
//! Status changes go through an explicit transition table; acceptance
//! validates the chosen vehicle against availability, capacity, and
//! refrigeration so a request can never be double-booked onto a busy truck.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Driver, Location, Payment, PaymentId, PaymentMethod, PaymentStatus, RequestDraft, RequestId,
    RequestStatus, TransportRequest, Vehicle, VehicleDraft, VehicleId, VehicleType,
};
pub use repository::TransportRepository;
pub use router::transport_router;
pub use service::{TransportService, TransportServiceError};
