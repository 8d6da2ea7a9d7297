//! In-memory image storage for tests and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ImageStorage, StorageError};

/// Stored object: bytes plus content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStorage {
    objects: Arc<RwLock<HashMap<String, StoredImage>>>,
    fail: Arc<RwLock<bool>>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `store` calls fail with an IO error.
    pub async fn fail_stores(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn get(&self, path: &str) -> Option<StoredImage> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn store(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        if *self.fail.read().await {
            return Err(StorageError::Io("storage unavailable".to_string()));
        }

        self.objects.write().await.insert(
            path.to_string(),
            StoredImage {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("memory://{}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_memory_url() {
        let storage = InMemoryImageStorage::new();

        let url = storage.store("uploads/u/1-a.png", b"abc", "image/png").await.unwrap();

        assert_eq!(url, "memory://uploads/u/1-a.png");
        assert_eq!(storage.get("uploads/u/1-a.png").await.unwrap().bytes, b"abc");
    }

    #[tokio::test]
    async fn failing_storage_reports_io_error() {
        let storage = InMemoryImageStorage::new();
        storage.fail_stores(true).await;

        let err = storage.store("p", b"x", "image/png").await.unwrap_err();

        assert!(matches!(err, StorageError::Io(_)));
        assert!(storage.is_empty().await);
    }
}
