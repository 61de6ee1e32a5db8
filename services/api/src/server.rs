use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryBookingLedger};
use crate::routes::{with_marketplace_routes, Marketplace};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use keyhaven::config::AppConfig;
use keyhaven::error::AppError;
use keyhaven::marketplace::accounts::{AccountService, InMemoryInbox};
use keyhaven::marketplace::booking::{
    BookingService, BookingServiceError, FeeSchedule, PaystackInline,
};
use keyhaven::marketplace::catalog::Catalog;
use keyhaven::marketplace::dashboard::{AdminDesk, HomeownerDesk};
use keyhaven::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(Catalog::load(&config.catalog));
    let ledger = Arc::new(InMemoryBookingLedger::seeded());
    let gateway = PaystackInline::from_config(&config.payments);
    if !gateway.is_configured() {
        warn!("APP_PAYSTACK_PUBLIC_KEY is not set; checkout will answer 503");
    }
    let seeded_bookings = ledger.len().map_err(BookingServiceError::from)?;
    info!(
        listings = catalog.len(),
        bookings = seeded_bookings,
        currency = %config.payments.currency,
        "marketplace data loaded"
    );

    let bookings = BookingService::new(
        catalog.clone(),
        ledger,
        Arc::new(gateway),
        FeeSchedule::from(&config.payments),
    );
    let marketplace = Marketplace {
        catalog,
        bookings: Arc::new(bookings),
        accounts: Arc::new(AccountService::new(Arc::new(InMemoryInbox::default()))),
        admin: Arc::new(AdminDesk::seeded()),
        homeowner: Arc::new(HomeownerDesk::seeded()),
    };

    let app = with_marketplace_routes(marketplace)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "keyhaven marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
