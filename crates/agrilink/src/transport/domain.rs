use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for transport requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Identifier wrapper for registered vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

/// Identifier wrapper for recorded payments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub String);

/// A geographic point with its human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// Contact details for the person behind the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleType {
    Truck,
    Van,
    Refrigerated,
    Pickup,
    Other,
}

/// A transporter's registered vehicle. Capacity is in tons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub transporter_id: String,
    pub vehicle_type: VehicleType,
    pub license_plate: String,
    pub capacity: f64,
    pub is_refrigerated: bool,
    pub is_available: bool,
    pub current_location: Option<Location>,
    pub driver: Option<Driver>,
}

/// Fields a transporter supplies when registering a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub transporter_id: String,
    pub vehicle_type: VehicleType,
    pub license_plate: String,
    pub capacity: f64,
    pub is_refrigerated: bool,
    #[serde(default)]
    pub current_location: Option<Location>,
    #[serde(default)]
    pub driver: Option<Driver>,
}

/// Lifecycle states of a transport request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    InTransit,
    Delivered,
    Cancelled,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::InTransit => "in-transit",
            RequestStatus::Delivered => "delivered",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Delivered | RequestStatus::Cancelled)
    }

    /// The transition table: pending -> accepted -> in-transit ->
    /// {delivered, cancelled}, with cancellation allowed from every
    /// non-terminal state.
    pub const fn can_transition(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Pending, RequestStatus::Cancelled)
                | (RequestStatus::Accepted, RequestStatus::InTransit)
                | (RequestStatus::Accepted, RequestStatus::Cancelled)
                | (RequestStatus::InTransit, RequestStatus::Delivered)
                | (RequestStatus::InTransit, RequestStatus::Cancelled)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A farmer's ask to move cargo from one location to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRequest {
    pub id: RequestId,
    pub farmer_id: String,
    pub status: RequestStatus,
    pub pickup_location: Location,
    pub delivery_location: Location,
    pub pickup_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub cargo_type: String,
    pub cargo_weight: f64,
    pub requires_refrigeration: bool,
    pub notes: Option<String>,
    pub price: Option<u32>,
    pub transporter_id: Option<String>,
    pub vehicle_id: Option<VehicleId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a farmer supplies when asking for transport. Identifier, status,
/// and timestamps are assigned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDraft {
    pub farmer_id: String,
    pub pickup_location: Location,
    pub delivery_location: Location,
    pub pickup_date: DateTime<Utc>,
    pub cargo_type: String,
    pub cargo_weight: f64,
    pub requires_refrigeration: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Card,
    Mobile,
    Cash,
}

/// A payment recorded against a request. Payments are bookkeeping only;
/// they are never reconciled against the request lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub request_id: RequestId,
    pub amount: u32,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub paid_at: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,
}
