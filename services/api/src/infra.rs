use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use agrilink::accounts::{UserId, UserRecord, UserRepository};
use agrilink::marketplace::{ListingId, ListingRepository, ListingStatus, MarketplaceListing};
use agrilink::repository::RepositoryError;
use agrilink::transport::{
    Payment, RequestId, RequestStatus, TransportRepository, TransportRequest, Vehicle, VehicleId,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTransportRepository {
    requests: Arc<Mutex<HashMap<RequestId, TransportRequest>>>,
    vehicles: Arc<Mutex<HashMap<VehicleId, Vehicle>>>,
    payments: Arc<Mutex<Vec<Payment>>>,
}

impl TransportRepository for InMemoryTransportRepository {
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
        if guard.contains_key(&request.id) {
            guard.insert(request.id.clone(), request);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
        if guard.contains_key(&vehicle.id) {
            guard.insert(vehicle.id.clone(), vehicle);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    listings: Arc<Mutex<HashMap<ListingId, MarketplaceListing>>>,
}

impl ListingRepository for InMemoryListingRepository {
    fn insert(
        &self,
        listing: MarketplaceListing,
    ) -> Result<MarketplaceListing, RepositoryError> {
        let mut guard = self.listings.lock().expect("listing mutex poisoned");
        if guard.contains_key(&listing.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: MarketplaceListing) -> Result<(), RepositoryError> {
        let mut guard = self.listings.lock().expect("listing mutex poisoned");
        if guard.contains_key(&listing.id) {
            guard.insert(listing.id.clone(), listing);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn update_if_status(
        &self,
        listing: MarketplaceListing,
        expected: ListingStatus,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.listings.lock().expect("listing mutex poisoned");
        match guard.get(&listing.id) {
            Some(stored) if stored.status == expected => {
                guard.insert(listing.id.clone(), listing);
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.listings.lock().expect("listing mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<MarketplaceListing>, RepositoryError> {
        let guard = self.listings.lock().expect("listing mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn listings(&self) -> Result<Vec<MarketplaceListing>, RepositoryError> {
        let guard = self.listings.lock().expect("listing mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<UserId, UserRecord>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        if guard.contains_key(&record.user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.user.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.user.email == email)
            .cloned())
    }
}
