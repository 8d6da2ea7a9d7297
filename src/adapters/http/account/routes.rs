//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{get_account, start_session};

/// # Routes
/// - `POST /account/session` - Provision or refresh the caller's record
/// - `GET /account` - Account view
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(get_account))
        .route("/account/session", post(start_session))
}
