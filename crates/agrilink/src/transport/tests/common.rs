use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::repository::RepositoryError;
use crate::transport::domain::{
    Driver, Location, Payment, RequestDraft, RequestId, RequestStatus, TransportRequest, Vehicle,
    VehicleDraft, VehicleId, VehicleType,
};
pub(super) use crate::transport::repository::TransportRepository;
use crate::transport::service::TransportService;

pub(super) fn marrakech_farm() -> Location {
    Location {
        latitude: 31.6295,
        longitude: -7.9811,
        address: "Farm Road 123, Marrakech".to_string(),
    }
}

pub(super) fn casablanca_market() -> Location {
    Location {
        latitude: 33.5731,
        longitude: -7.5898,
        address: "Central Market, Casablanca".to_string(),
    }
}

pub(super) fn orange_draft() -> RequestDraft {
    RequestDraft {
        farmer_id: "farmer-1".to_string(),
        pickup_location: marrakech_farm(),
        delivery_location: casablanca_market(),
        pickup_date: Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap(),
        cargo_type: "Oranges".to_string(),
        cargo_weight: 2.5,
        requires_refrigeration: true,
        notes: Some("Handle with care".to_string()),
    }
}

pub(super) fn refrigerated_truck() -> VehicleDraft {
    VehicleDraft {
        transporter_id: "transporter-2".to_string(),
        vehicle_type: VehicleType::Refrigerated,
        license_plate: "AB-12345".to_string(),
        capacity: 5.0,
        is_refrigerated: true,
        current_location: Some(casablanca_market()),
        driver: Some(Driver {
            name: "Karim Driver".to_string(),
            phone_number: "+212601234567".to_string(),
        }),
    }
}

pub(super) fn dry_van() -> VehicleDraft {
    VehicleDraft {
        transporter_id: "transporter-2".to_string(),
        vehicle_type: VehicleType::Van,
        license_plate: "CD-67890".to_string(),
        capacity: 1.0,
        is_refrigerated: false,
        current_location: None,
        driver: None,
    }
}

pub(super) fn build_service() -> (
    TransportService<MemoryTransportRepository>,
    Arc<MemoryTransportRepository>,
) {
    let repository = Arc::new(MemoryTransportRepository::default());
    let service = TransportService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryTransportRepository {
    requests: Arc<Mutex<HashMap<RequestId, TransportRequest>>>,
    vehicles: Arc<Mutex<HashMap<VehicleId, Vehicle>>>,
    payments: Arc<Mutex<Vec<Payment>>>,
}

impl TransportRepository for MemoryTransportRepository {
    fn insert_request(
        &self,
        request: TransportRequest,
    ) -> Result<TransportRequest, RepositoryError> {
        let mut guard = self.requests.lock().expect("request mutex poisoned");
        if guard.contains_key(&request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    fn update_request(&self, request: TransportRequest) -> Result<(), RepositoryError> {
        let mut guard = self.requests.lock().expect("request mutex poisoned");
        guard.insert(request.id.clone(), request);
        Ok(())
    }

    fn update_request_if_status(
        &self,
        request: TransportRequest,
        expected: RequestStatus,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.requests.lock().expect("request mutex poisoned");
        match guard.get(&request.id) {
            Some(stored) if stored.status == expected => {
                guard.insert(request.id.clone(), request);
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_request(&self, id: &RequestId) -> Result<Option<TransportRequest>, RepositoryError> {
        let guard = self.requests.lock().expect("request mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn requests(&self) -> Result<Vec<TransportRequest>, RepositoryError> {
        let guard = self.requests.lock().expect("request mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, RepositoryError> {
        let mut guard = self.vehicles.lock().expect("vehicle mutex poisoned");
        if guard.contains_key(&vehicle.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(vehicle.id.clone(), vehicle.clone());
        Ok(vehicle)
    }

    fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), RepositoryError> {
        let mut guard = self.vehicles.lock().expect("vehicle mutex poisoned");
        guard.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    fn update_vehicle_if_available(&self, vehicle: Vehicle) -> Result<(), RepositoryError> {
        let mut guard = self.vehicles.lock().expect("vehicle mutex poisoned");
        match guard.get(&vehicle.id) {
            Some(stored) if stored.is_available => {
                guard.insert(vehicle.id.clone(), vehicle);
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let guard = self.vehicles.lock().expect("vehicle mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        let guard = self.vehicles.lock().expect("vehicle mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn insert_payment(&self, payment: Payment) -> Result<Payment, RepositoryError> {
        let mut guard = self.payments.lock().expect("payment mutex poisoned");
        guard.push(payment.clone());
        Ok(payment)
    }

    fn payments(&self) -> Result<Vec<Payment>, RepositoryError> {
        let guard = self.payments.lock().expect("payment mutex poisoned");
        Ok(guard.clone())
    }
}

pub(super) struct UnavailableRepository;

impl TransportRepository for UnavailableRepository {
    fn insert_request(
        &self,
        _request: TransportRequest,
    ) -> Result<TransportRequest, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update_request(&self, _request: TransportRequest) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update_request_if_status(
        &self,
        _request: TransportRequest,
        _expected: RequestStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch_request(&self, _id: &RequestId) -> Result<Option<TransportRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn requests(&self) -> Result<Vec<TransportRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn insert_vehicle(&self, _vehicle: Vehicle) -> Result<Vehicle, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update_vehicle(&self, _vehicle: Vehicle) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update_vehicle_if_available(&self, _vehicle: Vehicle) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch_vehicle(&self, _id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn insert_payment(&self, _payment: Payment) -> Result<Payment, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn payments(&self) -> Result<Vec<Payment>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Delegates to the in-memory store but fails every request write, so
/// partially-committed flows can be observed.
#[derive(Default)]
pub(super) struct FailingRequestWrites {
    inner: MemoryTransportRepository,
}

impl TransportRepository for FailingRequestWrites {
    fn insert_request(
        &self,
        request: TransportRequest,
    ) -> Result<TransportRequest, RepositoryError> {
        self.inner.insert_request(request)
    }

    fn update_request(&self, _request: TransportRequest) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable(
            "request store offline".to_string(),
        ))
    }

    fn update_request_if_status(
        &self,
        _request: TransportRequest,
        _expected: RequestStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable(
            "request store offline".to_string(),
        ))
    }

    fn fetch_request(&self, id: &RequestId) -> Result<Option<TransportRequest>, RepositoryError> {
        self.inner.fetch_request(id)
    }

    fn requests(&self) -> Result<Vec<TransportRequest>, RepositoryError> {
        self.inner.requests()
    }

    fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, RepositoryError> {
        self.inner.insert_vehicle(vehicle)
    }

    fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), RepositoryError> {
        self.inner.update_vehicle(vehicle)
    }

    fn update_vehicle_if_available(&self, vehicle: Vehicle) -> Result<(), RepositoryError> {
        self.inner.update_vehicle_if_available(vehicle)
    }

    fn fetch_vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        self.inner.fetch_vehicle(id)
    }

    fn vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        self.inner.vehicles()
    }

    fn insert_payment(&self, payment: Payment) -> Result<Payment, RepositoryError> {
        self.inner.insert_payment(payment)
    }

    fn payments(&self) -> Result<Vec<Payment>, RepositoryError> {
        self.inner.payments()
    }
}
