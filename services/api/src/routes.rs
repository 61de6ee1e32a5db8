use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use keyhaven::marketplace::accounts::{accounts_router, AccountService, EnquiryInbox};
use keyhaven::marketplace::booking::{
    booking_router, BookingLedger, BookingService, PaymentGateway,
};
use keyhaven::marketplace::catalog::{catalog_router, Catalog};
use keyhaven::marketplace::dashboard::{admin_router, homeowner_router, AdminDesk, HomeownerDesk};
use serde_json::json;
use std::sync::Arc;

/// Shared services the HTTP surface is assembled from.
pub(crate) struct Marketplace<L, G, I> {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) bookings: Arc<BookingService<L, G>>,
    pub(crate) accounts: Arc<AccountService<I>>,
    pub(crate) admin: Arc<AdminDesk>,
    pub(crate) homeowner: Arc<HomeownerDesk>,
}

pub(crate) fn with_marketplace_routes<L, G, I>(marketplace: Marketplace<L, G, I>) -> Router
where
    L: BookingLedger + 'static,
    G: PaymentGateway + 'static,
    I: EnquiryInbox + 'static,
{
    catalog_router(marketplace.catalog)
        .merge(booking_router(marketplace.bookings))
        .merge(accounts_router(marketplace.accounts))
        .merge(admin_router(marketplace.admin))
        .merge(homeowner_router(marketplace.homeowner))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    if ready {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "starting" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryBookingLedger;
    use axum::body::Body;
    use axum::http::Request;
    use keyhaven::marketplace::accounts::InMemoryInbox;
    use keyhaven::marketplace::booking::{FeeSchedule, PaystackInline};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let catalog = Arc::new(Catalog::sample());
        let bookings = BookingService::new(
            catalog.clone(),
            Arc::new(InMemoryBookingLedger::seeded()),
            Arc::new(PaystackInline::new(None, "GHS")),
            FeeSchedule::default(),
        );
        let marketplace = Marketplace {
            catalog,
            bookings: Arc::new(bookings),
            accounts: Arc::new(AccountService::new(Arc::new(InMemoryInbox::default()))),
            admin: Arc::new(AdminDesk::seeded()),
            homeowner: Arc::new(HomeownerDesk::seeded()),
        };
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_marketplace_routes(marketplace).layer(Extension(state))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn readiness_tracks_the_listener_flag() {
        let (status, body) = get_json(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "starting");

        let (status, _) = get_json(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn merged_router_serves_every_area() {
        for uri in [
            "/health",
            "/api/v1/properties/top",
            "/api/v1/properties/4/durations",
            "/api/v1/bookings/GHI789/status",
            "/api/v1/auth/roles",
            "/api/v1/admin/summary",
            "/api/v1/homeowner/help",
        ] {
            let (status, _) = get_json(app(true), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn status_lookup_joins_catalog_listing() {
        let (status, body) = get_json(app(true), "/api/v1/bookings/ghi789/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["property_name"], "East Legon Family Home");
        assert_eq!(body["status_label"], "Completed");
    }
}
