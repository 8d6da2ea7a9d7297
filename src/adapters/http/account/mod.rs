//! HTTP adapter for account endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AccountResponse, SessionResponse};
pub use routes::account_routes;
