//! HTTP adapter for conversion endpoints.
//!
//! - `POST /convert` - Convert a screenshot into component code
//! - `GET /conversions` - Caller's conversion history
//! - `GET /conversions/public` - Public gallery
//! - `POST /uploads` - Upload a screenshot

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ConversionApiError, UploadApiError};
pub use routes::{authenticated_conversion_routes, public_conversion_routes};
