use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::repository::RepositoryError;

use super::domain::{
    Location, Payment, PaymentId, PaymentMethod, PaymentStatus, RequestDraft, RequestId,
    RequestStatus, TransportRequest, Vehicle, VehicleDraft, VehicleId,
};
use super::repository::TransportRepository;

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static VEHICLE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PAYMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> RequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RequestId(format!("req-{id:06}"))
}

fn next_vehicle_id() -> VehicleId {
    let id = VEHICLE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    VehicleId(format!("veh-{id:06}"))
}

fn next_payment_id() -> (PaymentId, String) {
    let id = PAYMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    (PaymentId(format!("pay-{id:06}")), format!("TXN{id:08}"))
}

/// Service enforcing the request lifecycle and the vehicle-availability
/// invariant over an injected repository.
pub struct TransportService<R> {
    repository: Arc<R>,
}

impl<R> TransportService<R>
where
    R: TransportRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a new request. It starts out pending and unassigned;
    /// feasibility (distance, weight vs. the eventual vehicle) is checked
    /// at acceptance, not here.
    pub fn create_request(
        &self,
        draft: RequestDraft,
    ) -> Result<TransportRequest, TransportServiceError> {
        let now = Utc::now();
        let request = TransportRequest {
            id: next_request_id(),
            farmer_id: draft.farmer_id,
            status: RequestStatus::Pending,
            pickup_location: draft.pickup_location,
            delivery_location: draft.delivery_location,
            pickup_date: draft.pickup_date,
            delivery_date: None,
            cargo_type: draft.cargo_type,
            cargo_weight: draft.cargo_weight,
            requires_refrigeration: draft.requires_refrigeration,
            notes: draft.notes,
            price: None,
            transporter_id: None,
            vehicle_id: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert_request(request)?;
        info!(request = %stored.id.0, farmer = %stored.farmer_id, "transport request created");
        Ok(stored)
    }

    /// Assign a transporter and vehicle to a pending request. The vehicle
    /// must be available, large enough for the cargo, and refrigerated when
    /// the cargo requires it. The price is fixed here, once.
    pub fn accept_request(
        &self,
        request_id: &RequestId,
        transporter_id: &str,
        vehicle_id: &VehicleId,
        price: u32,
    ) -> Result<TransportRequest, TransportServiceError> {
        let mut request = self
            .repository
            .fetch_request(request_id)?
            .ok_or(RepositoryError::NotFound)?;

        if request.status != RequestStatus::Pending {
            return Err(TransportServiceError::IllegalTransition {
                from: request.status,
                to: RequestStatus::Accepted,
            });
        }

        let mut vehicle = self
            .repository
            .fetch_vehicle(vehicle_id)?
            .ok_or(RepositoryError::NotFound)?;

        if !vehicle.is_available {
            return Err(TransportServiceError::VehicleUnavailable {
                vehicle: vehicle.id,
            });
        }
        if vehicle.capacity < request.cargo_weight {
            return Err(TransportServiceError::CapacityExceeded {
                capacity: vehicle.capacity,
                cargo_weight: request.cargo_weight,
            });
        }
        if request.requires_refrigeration && !vehicle.is_refrigerated {
            return Err(TransportServiceError::RefrigerationRequired {
                vehicle: vehicle.id,
            });
        }

        request.status = RequestStatus::Accepted;
        request.transporter_id = Some(transporter_id.to_string());
        request.vehicle_id = Some(vehicle.id.clone());
        request.price = Some(price);
        request.updated_at = Utc::now();

        // The lock commits only while the stored vehicle is still
        // available; a racing acceptance of the same vehicle loses here.
        vehicle.is_available = false;
        match self.repository.update_vehicle_if_available(vehicle) {
            Ok(()) => {}
            Err(RepositoryError::Conflict) => {
                return Err(TransportServiceError::VehicleUnavailable {
                    vehicle: vehicle_id.clone(),
                })
            }
            Err(err) => return Err(err.into()),
        }

        if let Err(err) = self
            .repository
            .update_request_if_status(request.clone(), RequestStatus::Pending)
        {
            // The vehicle was locked above but the request never left
            // pending; release it before reporting.
            if let Err(release_err) = self.release_vehicle(vehicle_id) {
                warn!(
                    vehicle = %vehicle_id.0,
                    error = %release_err,
                    "failed to release vehicle after aborted acceptance"
                );
            }
            return match err {
                RepositoryError::Conflict => {
                    let current = self
                        .repository
                        .fetch_request(request_id)?
                        .ok_or(RepositoryError::NotFound)?;
                    Err(TransportServiceError::IllegalTransition {
                        from: current.status,
                        to: RequestStatus::Accepted,
                    })
                }
                other => Err(other.into()),
            };
        }

        info!(
            request = %request.id.0,
            transporter = %transporter_id,
            vehicle = %vehicle_id.0,
            price,
            "transport request accepted"
        );
        Ok(request)
    }

    /// Advance a request to in-transit or delivered. Acceptance and
    /// cancellation have dedicated entry points; routing them through here
    /// is rejected so their side effects cannot be skipped.
    pub fn update_status(
        &self,
        request_id: &RequestId,
        next: RequestStatus,
        location: Option<Location>,
    ) -> Result<TransportRequest, TransportServiceError> {
        let mut request = self
            .repository
            .fetch_request(request_id)?
            .ok_or(RepositoryError::NotFound)?;

        let legal = matches!(next, RequestStatus::InTransit | RequestStatus::Delivered)
            && request.status.can_transition(next);
        if !legal {
            return Err(TransportServiceError::IllegalTransition {
                from: request.status,
                to: next,
            });
        }

        let previous = request.status;
        request.status = next;
        request.updated_at = Utc::now();
        if next == RequestStatus::Delivered {
            request.delivery_date = Some(request.updated_at);
        }

        self.commit_transition(request.clone(), previous, next)?;

        if let Some(vehicle_id) = request.vehicle_id.clone() {
            if let Some(mut vehicle) = self.repository.fetch_vehicle(&vehicle_id)? {
                if let Some(position) = location {
                    vehicle.current_location = Some(position);
                }
                if next == RequestStatus::Delivered {
                    vehicle.is_available = true;
                }
                self.repository.update_vehicle(vehicle)?;
            }
        }

        info!(request = %request.id.0, status = %next, "transport request advanced");
        Ok(request)
    }

    /// Cancel a request from any non-terminal state. The assignment stays on
    /// the record for audit, but an assigned vehicle is released.
    pub fn cancel_request(
        &self,
        request_id: &RequestId,
    ) -> Result<TransportRequest, TransportServiceError> {
        let mut request = self
            .repository
            .fetch_request(request_id)?
            .ok_or(RepositoryError::NotFound)?;

        if !request.status.can_transition(RequestStatus::Cancelled) {
            return Err(TransportServiceError::IllegalTransition {
                from: request.status,
                to: RequestStatus::Cancelled,
            });
        }

        let previous = request.status;
        request.status = RequestStatus::Cancelled;
        request.updated_at = Utc::now();

        self.commit_transition(request.clone(), previous, RequestStatus::Cancelled)?;

        if let Some(vehicle_id) = request.vehicle_id.clone() {
            self.release_vehicle(&vehicle_id)?;
        }

        info!(request = %request.id.0, "transport request cancelled");
        Ok(request)
    }

    pub fn add_vehicle(&self, draft: VehicleDraft) -> Result<Vehicle, TransportServiceError> {
        let vehicle = Vehicle {
            id: next_vehicle_id(),
            transporter_id: draft.transporter_id,
            vehicle_type: draft.vehicle_type,
            license_plate: draft.license_plate,
            capacity: draft.capacity,
            is_refrigerated: draft.is_refrigerated,
            is_available: true,
            current_location: draft.current_location,
            driver: draft.driver,
        };

        let stored = self.repository.insert_vehicle(vehicle)?;
        info!(vehicle = %stored.id.0, plate = %stored.license_plate, "vehicle registered");
        Ok(stored)
    }

    /// Flip a vehicle's availability. Marking a vehicle available while an
    /// active request still references it is rejected; availability is
    /// validated against assignments, not trusted from the caller.
    pub fn set_vehicle_availability(
        &self,
        vehicle_id: &VehicleId,
        available: bool,
    ) -> Result<Vehicle, TransportServiceError> {
        let mut vehicle = self
            .repository
            .fetch_vehicle(vehicle_id)?
            .ok_or(RepositoryError::NotFound)?;

        if available {
            if let Some(active) = self.active_assignment(vehicle_id)? {
                return Err(TransportServiceError::VehicleStillAssigned { request: active });
            }
        }

        vehicle.is_available = available;
        self.repository.update_vehicle(vehicle.clone())?;
        Ok(vehicle)
    }

    /// Record a payment against an existing request. Completed immediately;
    /// there is no gateway behind this.
    pub fn record_payment(
        &self,
        request_id: &RequestId,
        amount: u32,
        method: PaymentMethod,
    ) -> Result<Payment, TransportServiceError> {
        self.repository
            .fetch_request(request_id)?
            .ok_or(RepositoryError::NotFound)?;

        let (id, transaction_id) = next_payment_id();
        let payment = Payment {
            id,
            request_id: request_id.clone(),
            amount,
            status: PaymentStatus::Completed,
            method,
            paid_at: Some(Utc::now()),
            transaction_id: Some(transaction_id),
        };

        let stored = self.repository.insert_payment(payment)?;
        info!(payment = %stored.id.0, request = %request_id.0, amount, "payment recorded");
        Ok(stored)
    }

    pub fn request(
        &self,
        request_id: &RequestId,
    ) -> Result<TransportRequest, TransportServiceError> {
        let request = self
            .repository
            .fetch_request(request_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(request)
    }

    pub fn requests_for_farmer(
        &self,
        farmer_id: &str,
    ) -> Result<Vec<TransportRequest>, TransportServiceError> {
        let requests = self.repository.requests()?;
        Ok(requests
            .into_iter()
            .filter(|request| request.farmer_id == farmer_id)
            .collect())
    }

    pub fn requests_for_transporter(
        &self,
        transporter_id: &str,
    ) -> Result<Vec<TransportRequest>, TransportServiceError> {
        let requests = self.repository.requests()?;
        Ok(requests
            .into_iter()
            .filter(|request| request.transporter_id.as_deref() == Some(transporter_id))
            .collect())
    }

    /// Requests no transporter has claimed yet.
    pub fn open_requests(&self) -> Result<Vec<TransportRequest>, TransportServiceError> {
        let requests = self.repository.requests()?;
        Ok(requests
            .into_iter()
            .filter(|request| request.status == RequestStatus::Pending)
            .collect())
    }

    pub fn all_requests(&self) -> Result<Vec<TransportRequest>, TransportServiceError> {
        Ok(self.repository.requests()?)
    }

    pub fn vehicles_for_transporter(
        &self,
        transporter_id: &str,
    ) -> Result<Vec<Vehicle>, TransportServiceError> {
        let vehicles = self.repository.vehicles()?;
        Ok(vehicles
            .into_iter()
            .filter(|vehicle| vehicle.transporter_id == transporter_id)
            .collect())
    }

    pub fn all_vehicles(&self) -> Result<Vec<Vehicle>, TransportServiceError> {
        Ok(self.repository.vehicles()?)
    }

    pub fn payments_for_request(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<Payment>, TransportServiceError> {
        let payments = self.repository.payments()?;
        Ok(payments
            .into_iter()
            .filter(|payment| &payment.request_id == request_id)
            .collect())
    }

    /// Conditional write of a status change: the request is replaced only
    /// while the stored status still matches `expected`. A lost race is
    /// reported as an illegal transition from the state that won.
    fn commit_transition(
        &self,
        request: TransportRequest,
        expected: RequestStatus,
        to: RequestStatus,
    ) -> Result<(), TransportServiceError> {
        match self.repository.update_request_if_status(request.clone(), expected) {
            Ok(()) => Ok(()),
            Err(RepositoryError::Conflict) => {
                let current = self
                    .repository
                    .fetch_request(&request.id)?
                    .ok_or(RepositoryError::NotFound)?;
                Err(TransportServiceError::IllegalTransition {
                    from: current.status,
                    to,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn release_vehicle(&self, vehicle_id: &VehicleId) -> Result<(), TransportServiceError> {
        if let Some(mut vehicle) = self.repository.fetch_vehicle(vehicle_id)? {
            vehicle.is_available = true;
            self.repository.update_vehicle(vehicle)?;
        }
        Ok(())
    }

    fn active_assignment(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Option<RequestId>, TransportServiceError> {
        let requests = self.repository.requests()?;
        Ok(requests
            .into_iter()
            .find(|request| {
                request.vehicle_id.as_ref() == Some(vehicle_id)
                    && matches!(
                        request.status,
                        RequestStatus::Accepted | RequestStatus::InTransit
                    )
            })
            .map(|request| request.id))
    }
}

/// Error raised by the transport service.
#[derive(Debug, thiserror::Error)]
pub enum TransportServiceError {
    #[error("cannot move request from {from} to {to}")]
    IllegalTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("vehicle {} is not available", vehicle.0)]
    VehicleUnavailable { vehicle: VehicleId },
    #[error("vehicle capacity {capacity} t is below the cargo weight {cargo_weight} t")]
    CapacityExceeded { capacity: f64, cargo_weight: f64 },
    #[error("cargo requires refrigeration but vehicle {} is not refrigerated", vehicle.0)]
    RefrigerationRequired { vehicle: VehicleId },
    #[error("vehicle is still assigned to request {}", request.0)]
    VehicleStillAssigned { request: RequestId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
