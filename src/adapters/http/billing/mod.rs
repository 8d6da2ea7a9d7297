//! HTTP adapter for billing endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CheckoutApiError, WebhookApiError, STRIPE_SIGNATURE_HEADER};
pub use routes::billing_routes;
