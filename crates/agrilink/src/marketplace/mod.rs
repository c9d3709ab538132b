//! Marketplace registry: listings of goods offered for sale by farmers,
//! with search, filtering, purchase, and a CSV bulk import.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, DeliveryOptions, ListingDraft, ListingFilter, ListingId, ListingStatus,
    ListingUpdate, MarketplaceListing, SellerSummary, Specifications,
};
pub use import::{ListingCsvImporter, ListingImportError};
pub use repository::ListingRepository;
pub use router::marketplace_router;
pub use service::{MarketplaceService, MarketplaceServiceError};
