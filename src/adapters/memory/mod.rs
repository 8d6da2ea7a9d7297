//! In-memory repository adapters for tests and local development.

mod conversion_repository;
mod user_repository;

pub use conversion_repository::InMemoryConversionRepository;
pub use user_repository::InMemoryUserRepository;
