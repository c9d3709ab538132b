use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
    Available,
    Sold,
    PendingDelivery,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Sold => "sold",
            ListingStatus::PendingDelivery => "pending-delivery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Fruits,
    Vegetables,
    Grains,
    Dairy,
    Meat,
    Other,
}

/// Whether the seller can deliver, and at what estimated cost/time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    pub available: bool,
    #[serde(default)]
    pub estimated_cost: Option<u32>,
    #[serde(default)]
    pub estimated_time: Option<String>,
}

/// Provenance and storage details supplied by the seller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specifications {
    pub origin: String,
    #[serde(default)]
    pub harvest_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub storage_requirements: Option<String>,
}

/// Denormalized seller info shown next to a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerSummary {
    pub name: String,
    pub rating: f32,
    pub total_sales: u32,
}

/// A marketplace offer of goods for sale by a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceListing {
    pub id: ListingId,
    pub farmer_id: String,
    pub type_of_good: String,
    pub condition: String,
    pub quantity: f64,
    pub unit: String,
    pub quality: String,
    pub time_of_offer: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub photos: Vec<String>,
    pub price_per_unit: u32,
    pub delivery_options: DeliveryOptions,
    pub status: ListingStatus,
    pub category: Category,
    pub specifications: Specifications,
    pub seller: SellerSummary,
    pub buyer_id: Option<String>,
    pub sold_at: Option<DateTime<Utc>>,
}

/// Fields a farmer supplies when creating a listing. Identifier, offer time,
/// and status are assigned by the registry; a submitted status is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub farmer_id: String,
    pub type_of_good: String,
    pub condition: String,
    pub quantity: f64,
    pub unit: String,
    pub quality: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub price_per_unit: u32,
    pub delivery_options: DeliveryOptions,
    pub category: Category,
    #[serde(default)]
    pub specifications: Specifications,
    pub seller: SellerSummary,
}

/// Shallow-merge update: only the provided fields are replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingUpdate {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    #[serde(default)]
    pub price_per_unit: Option<u32>,
    #[serde(default)]
    pub delivery_options: Option<DeliveryOptions>,
    #[serde(default)]
    pub specifications: Option<Specifications>,
}

/// Multi-field filter over the listing collection. Text fields match as
/// case-insensitive substrings except condition, which is exact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub type_of_good: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub max_price: Option<u32>,
    #[serde(default)]
    pub min_quantity: Option<f64>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        self.type_of_good.is_none()
            && self.condition.is_none()
            && self.location.is_none()
            && self.max_price.is_none()
            && self.min_quantity.is_none()
    }

    pub fn matches(&self, listing: &MarketplaceListing) -> bool {
        if let Some(type_of_good) = &self.type_of_good {
            if !listing
                .type_of_good
                .to_lowercase()
                .contains(&type_of_good.to_lowercase())
            {
                return false;
            }
        }
        if let Some(condition) = &self.condition {
            if &listing.condition != condition {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !listing
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if listing.price_per_unit > max_price {
                return false;
            }
        }
        if let Some(min_quantity) = self.min_quantity {
            if listing.quantity < min_quantity {
                return false;
            }
        }
        true
    }
}
