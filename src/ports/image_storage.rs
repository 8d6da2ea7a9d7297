//! Object storage port for uploaded screenshots.

use async_trait::async_trait;
use thiserror::Error;

/// Stores image bytes and returns a URL the vision model can fetch.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store `bytes` at `path` (relative, `/`-separated) and return its public URL.
    async fn store(&self, path: &str, bytes: &[u8], content_type: &str)
        -> Result<String, StorageError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("invalid object path: {0}")]
    InvalidPath(String),

    #[error("io error: {0}")]
    Io(String),
}
