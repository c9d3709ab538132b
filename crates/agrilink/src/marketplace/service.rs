use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::repository::RepositoryError;

use super::domain::{
    ListingDraft, ListingFilter, ListingId, ListingStatus, ListingUpdate, MarketplaceListing,
};
use super::repository::ListingRepository;

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("lst-{id:06}"))
}

/// CRUD and query surface over the listing collection.
pub struct MarketplaceService<R> {
    repository: Arc<R>,
}

impl<R> MarketplaceService<R>
where
    R: ListingRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Publish a listing. It always enters the collection as available,
    /// whatever the caller's draft claims.
    pub fn create_listing(
        &self,
        draft: ListingDraft,
    ) -> Result<MarketplaceListing, MarketplaceServiceError> {
        let listing = MarketplaceListing {
            id: next_listing_id(),
            farmer_id: draft.farmer_id,
            type_of_good: draft.type_of_good,
            condition: draft.condition,
            quantity: draft.quantity,
            unit: draft.unit,
            quality: draft.quality,
            time_of_offer: Utc::now(),
            location: draft.location,
            description: draft.description,
            photos: draft.photos,
            price_per_unit: draft.price_per_unit,
            delivery_options: draft.delivery_options,
            status: ListingStatus::Available,
            category: draft.category,
            specifications: draft.specifications,
            seller: draft.seller,
            buyer_id: None,
            sold_at: None,
        };

        let stored = self.repository.insert(listing)?;
        info!(listing = %stored.id.0, farmer = %stored.farmer_id, "listing published");
        Ok(stored)
    }

    /// Shallow merge of the provided fields into the stored listing.
    pub fn update_listing(
        &self,
        listing_id: &ListingId,
        update: ListingUpdate,
    ) -> Result<MarketplaceListing, MarketplaceServiceError> {
        let mut listing = self
            .repository
            .fetch(listing_id)?
            .ok_or(RepositoryError::NotFound)?;

        if let Some(condition) = update.condition {
            listing.condition = condition;
        }
        if let Some(quantity) = update.quantity {
            listing.quantity = quantity;
        }
        if let Some(quality) = update.quality {
            listing.quality = quality;
        }
        if let Some(location) = update.location {
            listing.location = location;
        }
        if let Some(description) = update.description {
            listing.description = description;
        }
        if let Some(photos) = update.photos {
            listing.photos = photos;
        }
        if let Some(price_per_unit) = update.price_per_unit {
            listing.price_per_unit = price_per_unit;
        }
        if let Some(delivery_options) = update.delivery_options {
            listing.delivery_options = delivery_options;
        }
        if let Some(specifications) = update.specifications {
            listing.specifications = specifications;
        }

        self.repository.update(listing.clone())?;
        Ok(listing)
    }

    /// Remove a listing outright. This is the only hard delete the system
    /// performs.
    pub fn delete_listing(&self, listing_id: &ListingId) -> Result<(), MarketplaceServiceError> {
        self.repository.delete(listing_id)?;
        info!(listing = %listing_id.0, "listing deleted");
        Ok(())
    }

    /// Sell a listing to a buyer. Only available listings can be bought;
    /// a second purchase is rejected rather than silently overwriting the
    /// first buyer.
    pub fn purchase_listing(
        &self,
        listing_id: &ListingId,
        buyer_id: &str,
    ) -> Result<MarketplaceListing, MarketplaceServiceError> {
        let mut listing = self
            .repository
            .fetch(listing_id)?
            .ok_or(RepositoryError::NotFound)?;

        if listing.status != ListingStatus::Available {
            return Err(MarketplaceServiceError::NotAvailable {
                status: listing.status,
            });
        }

        listing.status = ListingStatus::Sold;
        listing.buyer_id = Some(buyer_id.to_string());
        listing.sold_at = Some(Utc::now());

        // The sale commits only while the stored listing is still
        // available, so two racing buyers cannot both win.
        match self
            .repository
            .update_if_status(listing.clone(), ListingStatus::Available)
        {
            Ok(()) => {
                info!(listing = %listing.id.0, buyer = %buyer_id, "listing sold");
                Ok(listing)
            }
            Err(RepositoryError::Conflict) => {
                let current = self
                    .repository
                    .fetch(listing_id)?
                    .ok_or(RepositoryError::NotFound)?;
                Err(MarketplaceServiceError::NotAvailable {
                    status: current.status,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<MarketplaceListing, MarketplaceServiceError> {
        let listing = self
            .repository
            .fetch(listing_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(listing)
    }

    pub fn listings_for_farmer(
        &self,
        farmer_id: &str,
    ) -> Result<Vec<MarketplaceListing>, MarketplaceServiceError> {
        let listings = self.repository.listings()?;
        Ok(listings
            .into_iter()
            .filter(|listing| listing.farmer_id == farmer_id)
            .collect())
    }

    pub fn available_listings(
        &self,
    ) -> Result<Vec<MarketplaceListing>, MarketplaceServiceError> {
        let listings = self.repository.listings()?;
        Ok(listings
            .into_iter()
            .filter(|listing| listing.status == ListingStatus::Available)
            .collect())
    }

    pub fn all_listings(&self) -> Result<Vec<MarketplaceListing>, MarketplaceServiceError> {
        Ok(self.repository.listings()?)
    }

    /// Free-text search across type, location, quality, and condition.
    pub fn search_listings(
        &self,
        query: &str,
    ) -> Result<Vec<MarketplaceListing>, MarketplaceServiceError> {
        let needle = query.to_lowercase();
        let listings = self.repository.listings()?;
        Ok(listings
            .into_iter()
            .filter(|listing| {
                listing.type_of_good.to_lowercase().contains(&needle)
                    || listing.location.to_lowercase().contains(&needle)
                    || listing.quality.to_lowercase().contains(&needle)
                    || listing.condition.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn filter_listings(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<MarketplaceListing>, MarketplaceServiceError> {
        let listings = self.repository.listings()?;
        Ok(listings
            .into_iter()
            .filter(|listing| filter.matches(listing))
            .collect())
    }
}

/// Error raised by the marketplace service.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceServiceError {
    #[error("listing is not available (currently {})", status.label())]
    NotAvailable { status: ListingStatus },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
