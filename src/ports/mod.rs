//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports and are
//! injected as `Arc<dyn Trait>`.
//!
//! ## Storage Ports
//!
//! - `UserRepository` - User records, including the atomic credit decrement
//! - `ConversionRepository` - Append-only conversion history
//! - `ImageStorage` - Uploaded screenshots
//!
//! ## External Service Ports
//!
//! - `CodeGenerator` - Vision model
//! - `PaymentProvider` - Hosted checkout
//! - `SessionValidator` - Bearer token validation

mod code_generator;
mod conversion_repository;
mod image_storage;
mod payment_provider;
mod session_validator;
mod user_repository;

pub use code_generator::{CodeGenerator, GenerationError};
pub use conversion_repository::ConversionRepository;
pub use image_storage::{ImageStorage, StorageError};
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
};
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
