//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - OpenAI vision generator and a mock
//! - `auth` - JWT session validation and a mock
//! - `http` - axum REST API
//! - `memory` - In-memory repositories
//! - `postgres` - PostgreSQL repositories
//! - `storage` - Screenshot object storage
//! - `stripe` - Stripe checkout and a mock

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
pub mod stripe;
