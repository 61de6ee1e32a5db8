use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::checkout::{BookingRequest, CheckoutError, PaymentError, MISSING_FIELDS_MESSAGE};
use super::duration::RawDuration;
use super::service::{BookingService, BookingServiceError};
use super::status::{BookingCodeError, BookingLedger};
use super::PaymentGateway;
use crate::marketplace::catalog::router::catalog_error_response;
use crate::marketplace::catalog::PropertyId;

#[derive(Debug, Default, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub duration: Option<RawDuration>,
}

/// Booking endpoints: lease options, quotes, checkout, and status lookup.
pub fn booking_router<L, G>(service: Arc<BookingService<L, G>>) -> Router
where
    L: BookingLedger + 'static,
    G: PaymentGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/properties/:property_id/durations",
            get(durations_handler::<L, G>),
        )
        .route(
            "/api/v1/properties/:property_id/quote",
            post(quote_handler::<L, G>),
        )
        .route("/api/v1/bookings/checkout", post(checkout_handler::<L, G>))
        .route(
            "/api/v1/bookings/:booking_code/status",
            get(status_handler::<L, G>),
        )
        .with_state(service)
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

pub(crate) fn booking_error_response(error: BookingServiceError) -> Response {
    match error {
        BookingServiceError::Catalog(err) => catalog_error_response(err),
        BookingServiceError::Checkout(CheckoutError::MissingFields { fields }) => {
            let payload = json!({
                "error": MISSING_FIELDS_MESSAGE,
                "fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        err @ (BookingServiceError::Checkout(_) | BookingServiceError::Duration(_)) => {
            error_body(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        err @ BookingServiceError::Code(BookingCodeError::Empty | BookingCodeError::Malformed(_)) => {
            error_body(StatusCode::BAD_REQUEST, err.to_string())
        }
        err @ BookingServiceError::BookingNotFound(_) => {
            error_body(StatusCode::NOT_FOUND, err.to_string())
        }
        err @ BookingServiceError::Payment(PaymentError::NotConfigured(_)) => {
            error_body(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        err @ BookingServiceError::Payment(PaymentError::Rejected(_)) => {
            error_body(StatusCode::BAD_GATEWAY, err.to_string())
        }
        err @ BookingServiceError::Ledger(_) => {
            error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

async fn durations_handler<L, G>(
    State(service): State<Arc<BookingService<L, G>>>,
    Path(property_id): Path<u32>,
) -> Response
where
    L: BookingLedger + 'static,
    G: PaymentGateway + 'static,
{
    match service.durations(PropertyId(property_id)) {
        Ok(choices) => (StatusCode::OK, axum::Json(choices)).into_response(),
        Err(err) => booking_error_response(err),
    }
}

async fn quote_handler<L, G>(
    State(service): State<Arc<BookingService<L, G>>>,
    Path(property_id): Path<u32>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    L: BookingLedger + 'static,
    G: PaymentGateway + 'static,
{
    match service.quote(PropertyId(property_id), request.duration.as_ref()) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(err) => booking_error_response(err),
    }
}

async fn checkout_handler<L, G>(
    State(service): State<Arc<BookingService<L, G>>>,
    axum::Json(request): axum::Json<BookingRequest>,
) -> Response
where
    L: BookingLedger + 'static,
    G: PaymentGateway + 'static,
{
    match service.checkout(request) {
        Ok(summary) => (StatusCode::CREATED, axum::Json(summary)).into_response(),
        Err(err) => booking_error_response(err),
    }
}

async fn status_handler<L, G>(
    State(service): State<Arc<BookingService<L, G>>>,
    Path(booking_code): Path<String>,
) -> Response
where
    L: BookingLedger + 'static,
    G: PaymentGateway + 'static,
{
    match service.status(&booking_code) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => booking_error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::booking::checkout::PaystackInline;
    use crate::marketplace::booking::pricing::FeeSchedule;
    use crate::marketplace::booking::status::{
        sample_bookings, BookingCode, BookingRecord, LedgerError,
    };
    use crate::marketplace::catalog::Catalog;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    struct SeededLedger(Vec<BookingRecord>);

    impl BookingLedger for SeededLedger {
        fn find(&self, code: &BookingCode) -> Result<Option<BookingRecord>, LedgerError> {
            Ok(self.0.iter().find(|record| &record.id == code).cloned())
        }
    }

    fn router(public_key: Option<&str>) -> Router {
        let service = BookingService::new(
            Arc::new(Catalog::sample()),
            Arc::new(SeededLedger(sample_bookings())),
            Arc::new(PaystackInline::new(public_key.map(str::to_string), "GHS")),
            FeeSchedule::default(),
        );
        booking_router(Arc::new(service))
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn durations_route_lists_labelled_options() {
        let response = router(None)
            .oneshot(
                Request::get("/api/v1/properties/2/durations")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["default"], 1);
        assert_eq!(payload["options"][1]["label"], "2 Years");
    }

    #[tokio::test]
    async fn quote_route_returns_fee_breakdown() {
        let response = router(None)
            .oneshot(post_json(
                "/api/v1/properties/1/quote",
                json!({ "duration": "2" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["total_property_price"], 6400);
        assert_eq!(payload["agent_fee"], 320);
        assert_eq!(payload["walking_fee"], 50);
        assert_eq!(payload["total"], 6770);
    }

    #[tokio::test]
    async fn quote_route_rejects_unoffered_duration() {
        let response = router(None)
            .oneshot(post_json(
                "/api/v1/properties/3/quote",
                json!({ "duration": 2 }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn checkout_route_reports_missing_fields() {
        let response = router(Some("pk_test"))
            .oneshot(post_json(
                "/api/v1/bookings/checkout",
                json!({ "property_id": 1, "first_name": "Ama", "duration": "1" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"], "Please fill in all required information.");
        assert_eq!(payload["fields"], json!(["last_name", "email", "phone"]));
    }

    #[tokio::test]
    async fn checkout_route_is_unavailable_without_public_key() {
        let response = router(None)
            .oneshot(post_json(
                "/api/v1/bookings/checkout",
                json!({
                    "property_id": 1,
                    "first_name": "Ama",
                    "last_name": "Mensah",
                    "email": "ama@example.com",
                    "phone": "0240000000",
                    "duration": 1
                }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn checkout_route_returns_widget_payload() {
        let response = router(Some("pk_test"))
            .oneshot(post_json(
                "/api/v1/bookings/checkout",
                json!({
                    "property_id": 1,
                    "first_name": "Ama",
                    "last_name": "Mensah",
                    "email": "ama@example.com",
                    "phone": "0240000000",
                    "duration": "1"
                }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = read_json_body(response).await;
        assert_eq!(payload["checkout"]["amount"], 341_000);
        assert_eq!(payload["checkout"]["currency"], "GHS");
        assert!(payload["checkout"]["ref"]
            .as_str()
            .unwrap_or_default()
            .starts_with("BOOK-"));
    }

    #[tokio::test]
    async fn status_route_maps_lookup_outcomes() {
        let found = router(None)
            .oneshot(
                Request::get("/api/v1/bookings/abc123/status")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(found.status(), StatusCode::OK);
        let payload = read_json_body(found).await;
        assert_eq!(payload["status_label"], "Confirmed");
        assert_eq!(payload["property_name"], "Villa Ocean Breeze");
        assert_eq!(payload["booking"]["status"], "confirmed");

        let missing = router(None)
            .oneshot(
                Request::get("/api/v1/bookings/QQQ111/status")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let malformed = router(None)
            .oneshot(
                Request::get("/api/v1/bookings/TOOLONG1/status")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }
}
