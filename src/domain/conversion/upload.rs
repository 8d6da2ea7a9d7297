//! Screenshot upload rules: accepted types, size cap, object naming.

use thiserror::Error;

use crate::domain::foundation::UserId;

/// Content types accepted for screenshot uploads.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Default upload size cap (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Invalid file type. Only PNG, JPG, and WebP are allowed.")]
    InvalidType(String),

    #[error("File too large. Maximum size is {max} bytes.")]
    TooLarge { size: usize, max: usize },

    #[error("Empty upload body")]
    Empty,

    #[error("Failed to upload image: {0}")]
    Storage(String),
}

/// Validates an upload before it reaches object storage.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    max_bytes: usize,
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Checks the content type and size. Returns the normalized content type.
    pub fn validate(&self, content_type: &str, size: usize) -> Result<&'static str, UploadError> {
        let normalized = normalize_content_type(content_type);
        let accepted = ALLOWED_IMAGE_TYPES
            .iter()
            .find(|allowed| **allowed == normalized)
            .ok_or_else(|| UploadError::InvalidType(content_type.to_string()))?;

        if size == 0 {
            return Err(UploadError::Empty);
        }
        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(accepted)
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Replaces every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File name used when the client does not send one.
pub fn default_file_name(content_type: &str) -> String {
    let extension = match content_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    };
    format!("screenshot.{}", extension)
}

/// Object path for an upload: `uploads/{userId}/{unixMillis}-{name}`.
pub fn upload_path(user_id: &UserId, unix_millis: i64, file_name: &str) -> String {
    format!(
        "uploads/{}/{}-{}",
        sanitize_file_name(user_id.as_str()),
        unix_millis,
        sanitize_file_name(file_name)
    )
}
