//! Conversion domain: records, pipeline errors and upload rules.

mod errors;
mod record;
pub mod upload;

pub use errors::ConversionError;
pub use record::ConversionRecord;
pub use upload::{UploadError, UploadPolicy};
