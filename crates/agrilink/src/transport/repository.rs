use crate::repository::RepositoryError;

use super::domain::{Payment, RequestId, RequestStatus, TransportRequest, Vehicle, VehicleId};

/// Storage abstraction for the transport registry so the service can be
/// exercised against in-memory doubles and, later, a real store.
pub trait TransportRepository: Send + Sync {
    fn insert_request(&self, request: TransportRequest)
        -> Result<TransportRequest, RepositoryError>;
    fn update_request(&self, request: TransportRequest) -> Result<(), RepositoryError>;
    /// Replaces the stored request only while its status still matches
    /// `expected`, checked and written under one lock. A lost race
    /// surfaces as `Conflict`.
    fn update_request_if_status(
        &self,
        request: TransportRequest,
        expected: RequestStatus,
    ) -> Result<(), RepositoryError>;
    fn fetch_request(&self, id: &RequestId) -> Result<Option<TransportRequest>, RepositoryError>;
    fn requests(&self) -> Result<Vec<TransportRequest>, RepositoryError>;

    fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, RepositoryError>;
    fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), RepositoryError>;
    /// Replaces the stored vehicle only while it is still marked
    /// available, checked and written under one lock. A lost race
    /// surfaces as `Conflict`.
    fn update_vehicle_if_available(&self, vehicle: Vehicle) -> Result<(), RepositoryError>;
    fn fetch_vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError>;
    fn vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError>;

    fn insert_payment(&self, payment: Payment) -> Result<Payment, RepositoryError>;
    fn payments(&self) -> Result<Vec<Payment>, RepositoryError>;
}
