use crate::infra::{
    InMemoryListingRepository, InMemoryTransportRepository, InMemoryUserRepository,
};
use agrilink::accounts::{AccountService, Credentials, Registration, UserRepository, UserRole};
use agrilink::error::AppError;
use agrilink::marketplace::{
    Category, DeliveryOptions, ListingCsvImporter, ListingDraft, ListingRepository,
    MarketplaceService, SellerSummary, Specifications,
};
use agrilink::transport::{
    Driver, Location, PaymentMethod, RequestDraft, RequestStatus, TransportRepository,
    TransportService, VehicleDraft, VehicleType,
};
use chrono::{Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the marketplace purchase portion of the demo.
    #[arg(long)]
    pub(crate) skip_marketplace: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MarketplaceImportArgs {
    /// Path to a CSV export of marketplace listings
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) struct SeededCounts {
    pub(crate) requests: usize,
    pub(crate) vehicles: usize,
    pub(crate) listings: usize,
    pub(crate) accounts: usize,
}

fn marrakech() -> Location {
    Location {
        latitude: 31.6295,
        longitude: -7.9811,
        address: "Marrakech, Morocco".to_string(),
    }
}

fn casablanca() -> Location {
    Location {
        latitude: 33.5731,
        longitude: -7.5898,
        address: "Casablanca, Morocco".to_string(),
    }
}

fn agadir() -> Location {
    Location {
        latitude: 30.4278,
        longitude: -9.5981,
        address: "Agadir, Morocco".to_string(),
    }
}

/// Seed the demo fleet, requests, listings, and accounts used by both the
/// `demo` subcommand and `serve --seed-demo`.
pub(crate) fn seed_demo_data<T, L, U>(
    transport: &TransportService<T>,
    marketplace: &MarketplaceService<L>,
    accounts: &AccountService<U>,
) -> Result<SeededCounts, AppError>
where
    T: TransportRepository,
    L: ListingRepository,
    U: UserRepository,
{
    let demo_accounts = [
        ("Hassan Farmer", "farmer@demo.com", UserRole::Farmer),
        ("Karim Transport", "transport@demo.com", UserRole::Transporter),
        ("Leila Store", "store@demo.com", UserRole::Store),
    ];
    for (name, email, role) in demo_accounts {
        accounts.register(Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: "password".to_string(),
            role,
            avatar: None,
            phone_number: Some("+212601234567".to_string()),
            address: None,
        })?;
    }

    transport.add_vehicle(VehicleDraft {
        transporter_id: "transporter-1".to_string(),
        vehicle_type: VehicleType::Refrigerated,
        license_plate: "AB-12345".to_string(),
        capacity: 5.0,
        is_refrigerated: true,
        current_location: Some(casablanca()),
        driver: Some(Driver {
            name: "Karim Driver".to_string(),
            phone_number: "+212601234567".to_string(),
        }),
    })?;
    transport.add_vehicle(VehicleDraft {
        transporter_id: "transporter-1".to_string(),
        vehicle_type: VehicleType::Van,
        license_plate: "CD-67890".to_string(),
        capacity: 1.5,
        is_refrigerated: false,
        current_location: Some(agadir()),
        driver: None,
    })?;

    transport.create_request(RequestDraft {
        farmer_id: "farmer-1".to_string(),
        pickup_location: marrakech(),
        delivery_location: casablanca(),
        pickup_date: Utc::now() + Duration::days(2),
        cargo_type: "Oranges".to_string(),
        cargo_weight: 2.5,
        requires_refrigeration: true,
        notes: Some("Handle with care".to_string()),
    })?;

    for draft in [demo_orange_listing(), demo_tomato_listing(), demo_olive_listing()] {
        marketplace.create_listing(draft)?;
    }

    Ok(SeededCounts {
        requests: transport.all_requests()?.len(),
        vehicles: transport.all_vehicles()?.len(),
        listings: marketplace.all_listings()?.len(),
        accounts: 3,
    })
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let transport_repository = Arc::new(InMemoryTransportRepository::default());
    let listing_repository = Arc::new(InMemoryListingRepository::default());
    let user_repository = Arc::new(InMemoryUserRepository::default());

    let transport = TransportService::new(transport_repository);
    let marketplace = MarketplaceService::new(listing_repository);
    let accounts = AccountService::new(user_repository);

    println!("AgriLink logistics marketplace demo");
    let seeded = seed_demo_data(&transport, &marketplace, &accounts)?;
    println!(
        "Seeded {} accounts, {} vehicles, {} open requests, {} listings",
        seeded.accounts, seeded.vehicles, seeded.requests, seeded.listings
    );

    println!("\nTransport lifecycle");
    let farmer = accounts.login(&Credentials {
        email: "farmer@demo.com".to_string(),
        password: "password".to_string(),
    })?;
    println!("- Logged in as {} ({})", farmer.name, farmer.email);

    let request = transport.create_request(RequestDraft {
        farmer_id: farmer.id.0.clone(),
        pickup_location: marrakech(),
        delivery_location: casablanca(),
        pickup_date: Utc::now() + Duration::days(1),
        cargo_type: "Fresh Oranges".to_string(),
        cargo_weight: 2.5,
        requires_refrigeration: true,
        notes: None,
    })?;
    println!(
        "- Created request {} ({} -> {}) -> status {}",
        request.id.0,
        request.pickup_location.address,
        request.delivery_location.address,
        request.status
    );

    let vehicle = match transport
        .all_vehicles()?
        .into_iter()
        .find(|vehicle| vehicle.is_available && vehicle.is_refrigerated)
    {
        Some(vehicle) => vehicle,
        None => {
            println!("- No refrigerated vehicle available; stopping");
            return Ok(());
        }
    };
    println!(
        "- Matching vehicle {} ({}, {} t, refrigerated)",
        vehicle.id.0, vehicle.license_plate, vehicle.capacity
    );

    let request = transport.accept_request(&request.id, &vehicle.transporter_id, &vehicle.id, 1200)?;
    println!(
        "- Accepted by {} at {} MAD -> status {}",
        vehicle.transporter_id,
        request.price.unwrap_or(0),
        request.status
    );

    let request = transport.update_status(&request.id, RequestStatus::InTransit, Some(marrakech()))?;
    println!("- Departed pickup -> status {}", request.status);

    let request = transport.update_status(&request.id, RequestStatus::Delivered, Some(casablanca()))?;
    println!(
        "- Arrived {} -> status {} (delivered {})",
        request.delivery_location.address,
        request.status,
        request
            .delivery_date
            .map(|date| date.to_rfc3339())
            .unwrap_or_default()
    );

    let payment = transport.record_payment(&request.id, request.price.unwrap_or(1200), PaymentMethod::Mobile)?;
    println!(
        "- Payment {} recorded: {} MAD via mobile (txn {})",
        payment.id.0,
        payment.amount,
        payment.transaction_id.as_deref().unwrap_or("n/a")
    );

    let vehicle = match transport
        .all_vehicles()?
        .into_iter()
        .find(|candidate| candidate.id == vehicle.id)
    {
        Some(vehicle) => vehicle,
        None => return Ok(()),
    };
    println!(
        "- Vehicle {} available again: {}",
        vehicle.id.0, vehicle.is_available
    );

    if args.skip_marketplace {
        return Ok(());
    }

    println!("\nMarketplace purchase");
    let buyer = accounts.login(&Credentials {
        email: "store@demo.com".to_string(),
        password: "password".to_string(),
    })?;
    println!("- Logged in as {} ({})", buyer.name, buyer.email);

    let listing = match marketplace.available_listings()?.into_iter().next() {
        Some(listing) => listing,
        None => {
            println!("- No listings available; stopping");
            return Ok(());
        }
    };
    println!(
        "- Buying {} x{} {} from {} at {} MAD/unit",
        listing.type_of_good,
        listing.quantity,
        listing.unit,
        listing.seller.name,
        listing.price_per_unit
    );

    let sold = marketplace.purchase_listing(&listing.id, &buyer.id.0)?;
    println!(
        "- Listing {} -> status {} (buyer {})",
        sold.id.0,
        sold.status.label(),
        sold.buyer_id.as_deref().unwrap_or("n/a")
    );

    Ok(())
}

pub(crate) fn run_marketplace_import(args: MarketplaceImportArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryListingRepository::default());
    let marketplace = MarketplaceService::new(repository);

    let drafts = ListingCsvImporter::from_path(&args.csv)?;
    println!("Imported {} rows from {}", drafts.len(), args.csv.display());

    for draft in drafts {
        let listing = marketplace.create_listing(draft)?;
        println!(
            "- {} | {} | {} {} | {} | {} MAD/unit",
            listing.id.0,
            listing.type_of_good,
            listing.quantity,
            listing.unit,
            listing.location,
            listing.price_per_unit
        );
    }

    Ok(())
}

fn demo_orange_listing() -> ListingDraft {
    ListingDraft {
        farmer_id: "farmer-1".to_string(),
        type_of_good: "Oranges".to_string(),
        condition: "fresh".to_string(),
        quantity: 250.0,
        unit: "kg".to_string(),
        quality: "premium".to_string(),
        location: "Marrakech".to_string(),
        description: "Late-season navel oranges".to_string(),
        photos: vec!["oranges-1.jpg".to_string()],
        price_per_unit: 18,
        delivery_options: DeliveryOptions {
            available: true,
            estimated_cost: Some(200),
            estimated_time: Some("2 days".to_string()),
        },
        category: Category::Fruits,
        specifications: Specifications {
            origin: "Souss Valley".to_string(),
            harvest_date: Some("2025-11-02".to_string()),
            expiry_date: None,
            certifications: vec!["Organic".to_string()],
            storage_requirements: Some("Refrigerated".to_string()),
        },
        seller: SellerSummary {
            name: "Hassan Farmer".to_string(),
            rating: 4.7,
            total_sales: 23,
        },
    }
}

fn demo_tomato_listing() -> ListingDraft {
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

fn demo_olive_listing() -> ListingDraft {
    ListingDraft {
        farmer_id: "farmer-1".to_string(),
        type_of_good: "Olives".to_string(),
        condition: "fresh".to_string(),
        quantity: 120.0,
        unit: "kg".to_string(),
        quality: "premium".to_string(),
        location: "Marrakech".to_string(),
        description: "Picholine olives for pressing".to_string(),
        photos: Vec::new(),
        price_per_unit: 35,
        delivery_options: DeliveryOptions {
            available: true,
            estimated_cost: Some(150),
            estimated_time: Some("3 days".to_string()),
        },
        category: Category::Fruits,
        specifications: Specifications {
            origin: "Atlas foothills".to_string(),
            harvest_date: Some("2025-10-18".to_string()),
            expiry_date: None,
            certifications: Vec::new(),
            storage_requirements: Some("Cool and dry".to_string()),
        },
        seller: SellerSummary {
            name: "Hassan Farmer".to_string(),
            rating: 4.7,
            total_sales: 23,
        },
    }
}
