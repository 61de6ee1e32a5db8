use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::{Local, Utc};
use serde::Deserialize;
use serde_json::json;

use super::admin::{AdminDesk, RecordKind};
use super::homeowner::{
    BookingAction, HomeownerDesk, ManualPayment, NewPaymentMethod, NewProperty, PasswordChange,
    ProfileUpdate, PropertyUpdate,
};
use super::{DashboardError, SearchQuery};

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    #[serde(default)]
    pub message: String,
}

fn dashboard_error_response(error: DashboardError) -> Response {
    let status = match error {
        DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
        DashboardError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DashboardError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(status: StatusCode, result: Result<T, DashboardError>) -> Response {
    match result {
        Ok(value) => (status, axum::Json(value)).into_response(),
        Err(err) => dashboard_error_response(err),
    }
}

pub fn admin_router(desk: Arc<AdminDesk>) -> Router {
    Router::new()
        .route("/api/v1/admin/summary", get(admin_summary))
        .route("/api/v1/admin/properties", get(admin_properties))
        .route("/api/v1/admin/homeowners", get(admin_homeowners))
        .route("/api/v1/admin/bookings", get(admin_bookings))
        .route("/api/v1/admin/guests", get(admin_guests))
        .route("/api/v1/admin/messages", get(admin_messages))
        .route("/api/v1/admin/replies", post(admin_reply))
        .route("/api/v1/admin/:kind/:record_id", delete(admin_delete))
        .with_state(desk)
}

async fn admin_summary(State(desk): State<Arc<AdminDesk>>) -> Response {
    respond(StatusCode::OK, desk.summary())
}

async fn admin_properties(
    State(desk): State<Arc<AdminDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.properties(&query))
}

async fn admin_homeowners(
    State(desk): State<Arc<AdminDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.homeowners(&query))
}

async fn admin_bookings(
    State(desk): State<Arc<AdminDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.bookings(&query))
}

async fn admin_guests(
    State(desk): State<Arc<AdminDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.guests(&query))
}

async fn admin_messages(
    State(desk): State<Arc<AdminDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.messages(&query))
}

async fn admin_reply(
    State(desk): State<Arc<AdminDesk>>,
    axum::Json(request): axum::Json<ReplyRequest>,
) -> Response {
    respond(
        StatusCode::CREATED,
        desk.reply(&request.message, Local::now().naive_local()),
    )
}

async fn admin_delete(
    State(desk): State<Arc<AdminDesk>>,
    Path((kind, record_id)): Path<(RecordKind, String)>,
) -> Response {
    match desk.delete(kind, &record_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => dashboard_error_response(err),
    }
}

pub fn homeowner_router(desk: Arc<HomeownerDesk>) -> Router {
    Router::new()
        .route("/api/v1/homeowner/summary", get(owner_summary))
        .route(
            "/api/v1/homeowner/properties",
            get(owner_properties).post(owner_add_property),
        )
        .route(
            "/api/v1/homeowner/properties/:listing_id",
            delete(owner_delete_property).patch(owner_edit_property),
        )
        .route("/api/v1/homeowner/bookings", get(owner_bookings))
        .route(
            "/api/v1/homeowner/bookings/:booking_id/:action",
            post(owner_booking_action),
        )
        .route(
            "/api/v1/homeowner/payment-methods",
            get(owner_payment_methods).post(owner_add_payment_method),
        )
        .route(
            "/api/v1/homeowner/payment-methods/:method_id",
            delete(owner_remove_payment_method),
        )
        .route("/api/v1/homeowner/payments", post(owner_manual_payment))
        .route(
            "/api/v1/homeowner/profile",
            get(owner_profile).patch(owner_update_profile),
        )
        .route("/api/v1/homeowner/password", post(owner_change_password))
        .route(
            "/api/v1/homeowner/support",
            get(owner_tickets).post(owner_open_ticket),
        )
        .route("/api/v1/homeowner/help", get(owner_help))
        .with_state(desk)
}

async fn owner_summary(State(desk): State<Arc<HomeownerDesk>>) -> Response {
    respond(StatusCode::OK, desk.summary())
}

async fn owner_properties(
    State(desk): State<Arc<HomeownerDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.properties(&query))
}

async fn owner_add_property(
    State(desk): State<Arc<HomeownerDesk>>,
    axum::Json(draft): axum::Json<NewProperty>,
) -> Response {
    respond(StatusCode::CREATED, desk.add_property(draft))
}

async fn owner_edit_property(
    State(desk): State<Arc<HomeownerDesk>>,
    Path(listing_id): Path<String>,
    axum::Json(update): axum::Json<PropertyUpdate>,
) -> Response {
    respond(StatusCode::OK, desk.edit_property(&listing_id, update))
}

async fn owner_delete_property(
    State(desk): State<Arc<HomeownerDesk>>,
    Path(listing_id): Path<String>,
) -> Response {
    match desk.delete_property(&listing_id) {
        Ok(dropped) => {
            let payload = json!({ "deleted": listing_id, "removed_bookings": dropped });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => dashboard_error_response(err),
    }
}

async fn owner_bookings(
    State(desk): State<Arc<HomeownerDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.bookings(&query))
}

async fn owner_booking_action(
    State(desk): State<Arc<HomeownerDesk>>,
    Path((booking_id, action)): Path<(String, BookingAction)>,
) -> Response {
    respond(
        StatusCode::OK,
        desk.apply_booking_action(&booking_id, action),
    )
}

async fn owner_payment_methods(
    State(desk): State<Arc<HomeownerDesk>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    respond(StatusCode::OK, desk.payment_methods(&query))
}

async fn owner_add_payment_method(
    State(desk): State<Arc<HomeownerDesk>>,
    axum::Json(method): axum::Json<NewPaymentMethod>,
) -> Response {
    respond(StatusCode::CREATED, desk.add_payment_method(method))
}

async fn owner_remove_payment_method(
    State(desk): State<Arc<HomeownerDesk>>,
    Path(method_id): Path<String>,
) -> Response {
    match desk.remove_payment_method(&method_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => dashboard_error_response(err),
    }
}

async fn owner_manual_payment(
    State(desk): State<Arc<HomeownerDesk>>,
    axum::Json(payment): axum::Json<ManualPayment>,
) -> Response {
    respond(
        StatusCode::CREATED,
        desk.record_manual_payment(payment, Local::now().date_naive()),
    )
}

async fn owner_profile(State(desk): State<Arc<HomeownerDesk>>) -> Response {
    respond(StatusCode::OK, desk.profile())
}

async fn owner_update_profile(
    State(desk): State<Arc<HomeownerDesk>>,
    axum::Json(update): axum::Json<ProfileUpdate>,
) -> Response {
    respond(StatusCode::OK, desk.update_profile(update))
}

async fn owner_change_password(
    State(desk): State<Arc<HomeownerDesk>>,
    axum::Json(change): axum::Json<PasswordChange>,
) -> Response {
    match desk.change_password(&change) {
        Ok(()) => {
            let payload = json!({ "message": "Password changed (mock)" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => dashboard_error_response(err),
    }
}

async fn owner_tickets(State(desk): State<Arc<HomeownerDesk>>) -> Response {
    respond(StatusCode::OK, desk.tickets())
}

async fn owner_open_ticket(
    State(desk): State<Arc<HomeownerDesk>>,
    axum::Json(request): axum::Json<TicketRequest>,
) -> Response {
    respond(
        StatusCode::CREATED,
        desk.open_ticket(&request.message, Utc::now()),
    )
}

async fn owner_help(State(desk): State<Arc<HomeownerDesk>>) -> Response {
    respond(StatusCode::OK, desk.help_resources())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn admin_guest_listing_includes_spend() {
        let response = admin_router(Arc::new(AdminDesk::seeded()))
            .oneshot(empty_request("GET", "/api/v1/admin/guests?q=kwame"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload[0]["name"], "Kwame Appiah");
        assert_eq!(payload[0]["booking_count"], 1);
        assert_eq!(payload[0]["total_spent"], 3410);
    }

    #[tokio::test]
    async fn admin_delete_route_maps_unknown_ids_to_not_found() {
        let desk = Arc::new(AdminDesk::seeded());

        let deleted = admin_router(desk.clone())
            .oneshot(empty_request("DELETE", "/api/v1/admin/messages/m2"))
            .await
            .expect("route executes");
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = admin_router(desk)
            .oneshot(empty_request("DELETE", "/api/v1/admin/properties/99"))
            .await
            .expect("route executes");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_reply_route_rejects_blank_text() {
        let response = admin_router(Arc::new(AdminDesk::seeded()))
            .oneshot(json_request(
                "POST",
                "/api/v1/admin/replies",
                json!({ "message": "  " }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"], "Reply cannot be empty.");
    }

    #[tokio::test]
    async fn homeowner_booking_action_route_updates_status() {
        let response = homeowner_router(Arc::new(HomeownerDesk::seeded()))
            .oneshot(empty_request(
                "POST",
                "/api/v1/homeowner/bookings/b-1/confirm",
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], "confirmed");
    }

    #[tokio::test]
    async fn homeowner_property_lifecycle_over_http() {
        let desk = Arc::new(HomeownerDesk::seeded());

        let created = homeowner_router(desk.clone())
            .oneshot(json_request(
                "POST",
                "/api/v1/homeowner/properties",
                json!({ "name": "Harbour Loft", "price": 700 }),
            ))
            .await
            .expect("route executes");
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = read_json_body(created).await;
        let id = created["id"].as_str().unwrap_or_default().to_string();

        let edited = homeowner_router(desk.clone())
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/homeowner/properties/{id}"),
                json!({ "beds": 2 }),
            ))
            .await
            .expect("route executes");
        assert_eq!(edited.status(), StatusCode::OK);
        let edited = read_json_body(edited).await;
        assert_eq!(edited["beds"], 2);
        assert_eq!(edited["name"], "Harbour Loft");

        let removed = homeowner_router(desk)
            .oneshot(empty_request(
                "DELETE",
                &format!("/api/v1/homeowner/properties/{id}"),
            ))
            .await
            .expect("route executes");
        assert_eq!(removed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn homeowner_manual_payment_rejects_zero_amount() {
        let response = homeowner_router(Arc::new(HomeownerDesk::seeded()))
            .oneshot(json_request(
                "POST",
                "/api/v1/homeowner/payments",
                json!({ "amount": 0 }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
