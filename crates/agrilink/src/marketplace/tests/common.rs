use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::marketplace::domain::{
    Category, DeliveryOptions, ListingDraft, ListingId, ListingStatus, MarketplaceListing,
    SellerSummary, Specifications,
};
pub(super) use crate::marketplace::repository::ListingRepository;
use crate::marketplace::service::MarketplaceService;
use crate::repository::RepositoryError;

pub(super) fn olive_draft() -> ListingDraft {
    ListingDraft {
        farmer_id: "farmer-1".to_string(),
        type_of_good: "Olives".to_string(),
        condition: "fresh".to_string(),
        quantity: 120.0,
        unit: "kg".to_string(),
        quality: "premium".to_string(),
        location: "Marrakech".to_string(),
        description: "Cold-pressed quality picholine olives".to_string(),
        photos: vec!["olives-1.jpg".to_string()],
        price_per_unit: 35,
        delivery_options: DeliveryOptions {
            available: true,
            estimated_cost: Some(150),
            estimated_time: Some("2 days".to_string()),
        },
        category: Category::Fruits,
        specifications: Specifications {
            origin: "Atlas foothills".to_string(),
            harvest_date: Some("2025-05-20".to_string()),
            expiry_date: None,
            certifications: vec!["Organic".to_string()],
            storage_requirements: Some("Cool and dry".to_string()),
        },
        seller: SellerSummary {
            name: "Hassan Farmer".to_string(),
            rating: 4.7,
            total_sales: 23,
        },
    }
}

pub(super) fn tomato_draft() -> ListingDraft {
    ListingDraft {
        farmer_id: "farmer-5".to_string(),
        type_of_good: "Tomatoes".to_string(),
        condition: "ripe".to_string(),
        quantity: 40.0,
        unit: "crate".to_string(),
        quality: "standard".to_string(),
        location: "Agadir".to_string(),
        description: String::new(),
        photos: Vec::new(),
        price_per_unit: 12,
        delivery_options: DeliveryOptions {
            available: false,
            estimated_cost: None,
            estimated_time: None,
        },
        category: Category::Vegetables,
        specifications: Specifications::default(),
        seller: SellerSummary {
            name: "Aicha Farmer".to_string(),
            rating: 4.2,
            total_sales: 9,
        },
    }
}

pub(super) fn build_service() -> (
    MarketplaceService<MemoryListingRepository>,
    Arc<MemoryListingRepository>,
) {
    let repository = Arc::new(MemoryListingRepository::default());
    let service = MarketplaceService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryListingRepository {
    listings: Arc<Mutex<HashMap<ListingId, MarketplaceListing>>>,
}

impl ListingRepository for MemoryListingRepository {
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
        guard.insert(listing.id.clone(), listing);
        Ok(())
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
