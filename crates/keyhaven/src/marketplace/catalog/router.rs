use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::{Catalog, CatalogError, PropertyFilter, PropertyId};

/// Read-only browse endpoints over the listing catalog.
pub fn catalog_router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/v1/properties", get(list_handler))
        .route("/api/v1/properties/top", get(top_rated_handler))
        .route("/api/v1/properties/new", get(new_listings_handler))
        .route("/api/v1/properties/:property_id", get(detail_handler))
        .route(
            "/api/v1/properties/:property_id/reviews",
            get(reviews_handler),
        )
        .with_state(catalog)
}

pub(crate) async fn list_handler(
    State(catalog): State<Arc<Catalog>>,
    Query(filter): Query<PropertyFilter>,
) -> Response {
    let matches = catalog.search(&filter);
    (StatusCode::OK, axum::Json(matches)).into_response()
}

pub(crate) async fn top_rated_handler(State(catalog): State<Arc<Catalog>>) -> Response {
    (StatusCode::OK, axum::Json(catalog.top_rated())).into_response()
}

pub(crate) async fn new_listings_handler(State(catalog): State<Arc<Catalog>>) -> Response {
    (StatusCode::OK, axum::Json(catalog.new_listings())).into_response()
}

pub(crate) async fn detail_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(property_id): Path<u32>,
) -> Response {
    match catalog.require(PropertyId(property_id)) {
        Ok(property) => (StatusCode::OK, axum::Json(property)).into_response(),
        Err(err) => catalog_error_response(err),
    }
}

pub(crate) async fn reviews_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(property_id): Path<u32>,
) -> Response {
    match catalog.reviews(PropertyId(property_id)) {
        Ok(reviews) => (StatusCode::OK, axum::Json(reviews)).into_response(),
        Err(err) => catalog_error_response(err),
    }
}

pub(crate) fn catalog_error_response(err: CatalogError) -> Response {
    let status = match err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
