//! Axum router configuration for billing endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{create_checkout, stripe_webhook};

/// # Routes
/// - `POST /checkout` - Create a hosted checkout session
/// - `POST /webhook` - Stripe event delivery (signature checked in-handler)
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/webhook", post(stripe_webhook))
}
