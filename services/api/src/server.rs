use crate::cli::ServeArgs;
use crate::demo::seed_demo_data;
use crate::infra::{
    AppState, InMemoryListingRepository, InMemoryTransportRepository, InMemoryUserRepository,
};
use crate::routes::api_routes;
use agrilink::accounts::AccountService;
use agrilink::config::AppConfig;
use agrilink::error::AppError;
use agrilink::marketplace::MarketplaceService;
use agrilink::telemetry;
use agrilink::transport::TransportService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.listen.host = host;
    }
    if let Some(port) = args.port.take() {
        config.listen.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let transport_repository = Arc::new(InMemoryTransportRepository::default());
    let listing_repository = Arc::new(InMemoryListingRepository::default());
    let user_repository = Arc::new(InMemoryUserRepository::default());

    let transport_service = Arc::new(TransportService::new(transport_repository));
    let marketplace_service = Arc::new(MarketplaceService::new(listing_repository));
    let account_service = Arc::new(AccountService::new(user_repository));

    if args.seed_demo || config.seed_demo {
        let seeded = seed_demo_data(&transport_service, &marketplace_service, &account_service)?;
        info!(
            requests = seeded.requests,
            vehicles = seeded.vehicles,
            listings = seeded.listings,
            accounts = seeded.accounts,
            "demo data seeded"
        );
    }

    let app = api_routes(transport_service, marketplace_service, account_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.listen.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(environment = %config.environment, %addr, "logistics marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
