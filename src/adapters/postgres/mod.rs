//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - User records and atomic credit consumption
//! - `PostgresConversionRepository` - Conversion history and public gallery
//!
//! Schema lives in `migrations/` and is applied with `sqlx::migrate!`.

mod conversion_repository;
mod user_repository;

pub use conversion_repository::PostgresConversionRepository;
pub use user_repository::PostgresUserRepository;
