//! HTTP adapter - REST API over axum.
//!
//! Each area has its own `dto`/`handlers`/`routes` triple. `api_router`
//! assembles them, puts session validation in front of the routes that need
//! a signed-in user, and wraps everything in the shared tower layers.

pub mod account;
pub mod billing;
pub mod conversion;
pub mod error;
pub mod middleware;
pub mod state;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ErrorResponse;
pub use state::{AppState, BillingSettings};

use account::account_routes;
use billing::billing_routes;
use conversion::{authenticated_conversion_routes, public_conversion_routes};
use middleware::auth_middleware;

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Router-wide settings that come from server configuration.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    /// Allowed CORS origins; any origin when empty.
    pub cors_origins: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(150),
            cors_origins: Vec::new(),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}

/// Builds the complete API router.
pub fn api_router(state: AppState, settings: RouterSettings) -> Router {
    let authenticated = Router::new()
        .merge(account_routes())
        .merge(authenticated_conversion_routes(state.upload_policy.max_bytes()))
        .route_layer(from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(public_conversion_routes())
        .merge(billing_routes())
        .merge(authenticated)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(&settings.cors_origins))
                .layer(TimeoutLayer::new(settings.request_timeout))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
