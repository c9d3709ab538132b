use crate::repository::RepositoryError;

use super::domain::{ListingId, ListingStatus, MarketplaceListing};

/// Storage abstraction for the marketplace registry.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, listing: MarketplaceListing)
        -> Result<MarketplaceListing, RepositoryError>;
    fn update(&self, listing: MarketplaceListing) -> Result<(), RepositoryError>;
    /// Replaces the stored listing only while its current status still
    /// matches `expected`. The comparison and the write happen under one
    /// lock; a lost race surfaces as `Conflict`.
    fn update_if_status(
        &self,
        listing: MarketplaceListing,
        expected: ListingStatus,
    ) -> Result<(), RepositoryError>;
    fn delete(&self, id: &ListingId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<MarketplaceListing>, RepositoryError>;
    fn listings(&self) -> Result<Vec<MarketplaceListing>, RepositoryError>;
}
