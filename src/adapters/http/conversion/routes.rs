//! Axum router configuration for conversion endpoints.

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{convert, list_conversions, list_public_conversions, upload_image};

/// Routes open to any caller.
///
/// `/convert` only requires that a Bearer credential is present; it is not
/// validated here.
pub fn public_conversion_routes() -> Router<AppState> {
    Router::new()
        .route("/convert", post(convert))
        .route("/conversions/public", get(list_public_conversions))
}

/// Routes that need a validated session.
///
/// # Routes
/// - `GET /conversions` - Caller's history
/// - `POST /uploads` - Screenshot upload, body capped at `max_upload_bytes`
pub fn authenticated_conversion_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/conversions", get(list_conversions))
        .route(
            "/uploads",
            post(upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
