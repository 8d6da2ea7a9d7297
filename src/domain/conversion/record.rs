//! Conversion record.

use crate::domain::foundation::{ConversionId, Timestamp, UserId};

/// Result of one successful pipeline run. Append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRecord {
    pub id: ConversionId,
    /// Weak reference; the user row is not required to exist.
    pub user_id: UserId,
    pub image_url: String,
    pub generated_code: String,
    pub is_public: bool,
    pub created_at: Timestamp,
}

impl ConversionRecord {
    /// Creates a private record stamped with the current time.
    pub fn new(user_id: UserId, image_url: impl Into<String>, generated_code: impl Into<String>) -> Self {
        Self {
            id: ConversionId::new(),
            user_id,
            image_url: image_url.into(),
            generated_code: generated_code.into(),
            is_public: false,
            created_at: Timestamp::now(),
        }
    }

    /// Marks the record for the public gallery.
    pub fn published(mut self) -> Self {
        self.is_public = true;
        self
    }
}
