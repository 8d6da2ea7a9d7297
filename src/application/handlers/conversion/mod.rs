//! Conversion handlers.
//!
//! ## Commands
//! - Converting a screenshot into component code
//! - Uploading a screenshot
//!
//! ## Queries
//! - The caller's conversion history
//! - The public gallery

mod convert_screenshot;
mod list_conversions;
mod upload_image;

pub use convert_screenshot::{
    ConvertScreenshotCommand, ConvertScreenshotHandler, ConvertScreenshotResult,
};
pub use list_conversions::{
    ListConversionsHandler, ListConversionsQuery, ListPublicConversionsHandler,
    ListPublicConversionsQuery, DEFAULT_GALLERY_LIMIT, DEFAULT_HISTORY_LIMIT, MAX_LIST_LIMIT,
};
pub use upload_image::{UploadImageCommand, UploadImageHandler, UploadImageResult};
