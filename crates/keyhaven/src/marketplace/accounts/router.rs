use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::{
    roles, AccountService, AuthError, ContactError, ContactForm, EnquiryInbox, LoginRequest,
    SignupRequest, CONTACT_ACKNOWLEDGEMENT,
};

pub fn accounts_router<I>(service: Arc<AccountService<I>>) -> Router
where
    I: EnquiryInbox + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<I>))
        .route("/api/v1/auth/signup", post(signup_handler::<I>))
        .route("/api/v1/auth/roles", get(roles_handler))
        .route("/api/v1/contact", post(contact_handler::<I>))
        .with_state(service)
}

fn auth_error_response(error: AuthError) -> Response {
    let payload = match &error {
        AuthError::MissingFields { fields } => json!({
            "error": error.to_string(),
            "fields": fields,
        }),
        _ => json!({ "error": error.to_string() }),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

async fn login_handler<I>(
    State(service): State<Arc<AccountService<I>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    I: EnquiryInbox + 'static,
{
    match service.login(&request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => auth_error_response(err),
    }
}

async fn signup_handler<I>(
    State(service): State<Arc<AccountService<I>>>,
    axum::Json(request): axum::Json<SignupRequest>,
) -> Response
where
    I: EnquiryInbox + 'static,
{
    match service.signup(&request) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(err) => auth_error_response(err),
    }
}

async fn roles_handler() -> Response {
    (StatusCode::OK, axum::Json(roles())).into_response()
}

async fn contact_handler<I>(
    State(service): State<Arc<AccountService<I>>>,
    axum::Json(form): axum::Json<ContactForm>,
) -> Response
where
    I: EnquiryInbox + 'static,
{
    match service.submit_enquiry(form) {
        Ok(enquiry) => {
            let payload = json!({
                "id": enquiry.id,
                "message": CONTACT_ACKNOWLEDGEMENT,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(ContactError::Inbox) => {
            let payload = json!({ "error": ContactError::Inbox.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
