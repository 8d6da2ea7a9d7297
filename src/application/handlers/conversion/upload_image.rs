//! UploadImageHandler - Stores a screenshot and returns its URL.

use std::sync::Arc;

use crate::domain::conversion::upload::{default_file_name, upload_path};
use crate::domain::conversion::{UploadError, UploadPolicy};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::ImageStorage;

#[derive(Debug, Clone)]
pub struct UploadImageCommand {
    pub user_id: UserId,
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImageResult {
    /// Public URL, usable as `imageUrl` for a conversion.
    pub url: String,
    pub path: String,
}

pub struct UploadImageHandler {
    storage: Arc<dyn ImageStorage>,
    policy: UploadPolicy,
}

impl UploadImageHandler {
    pub fn new(storage: Arc<dyn ImageStorage>, policy: UploadPolicy) -> Self {
        Self { storage, policy }
    }

    pub async fn handle(&self, cmd: UploadImageCommand) -> Result<UploadImageResult, UploadError> {
        let content_type = self.policy.validate(&cmd.content_type, cmd.bytes.len())?;

        let file_name = cmd
            .file_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_file_name(content_type));
        let path = upload_path(&cmd.user_id, Timestamp::now().as_unix_millis(), &file_name);

        let url = self
            .storage
            .store(&path, &cmd.bytes, content_type)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %cmd.user_id, path = %path, error = %e, "image upload failed");
                UploadError::Storage(e.to_string())
            })?;

        tracing::info!(user_id = %cmd.user_id, path = %path, size = cmd.bytes.len(), "image uploaded");
        Ok(UploadImageResult { url, path })
    }
}
