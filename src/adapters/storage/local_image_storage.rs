//! Local filesystem image storage.
//!
//! Writes uploaded screenshots under a root directory and hands back URLs
//! rooted at a public base URL that serves the same tree.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::ports::{ImageStorage, StorageError};

/// Filesystem-backed storage for uploaded images.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root_dir: PathBuf,
    public_base_url: String,
}

impl LocalImageStorage {
    /// # Example
    /// ```ignore
    /// let storage = LocalImageStorage::new("./data", "http://localhost:8080/files");
    /// ```
    pub fn new<P: AsRef<Path>>(root_dir: P, public_base_url: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.as_ref().to_path_buf(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Resolves `path` under the root, rejecting anything that could escape it.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        if path.is_empty()
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root_dir.join(relative))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let file_path = self.resolve(path)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }

        fs::write(&file_path, bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(path, content_type, size = bytes.len(), "image stored");
        Ok(self.public_url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> LocalImageStorage {
        LocalImageStorage::new(dir.path(), "http://localhost:8080/files/")
    }

    #[tokio::test]
    async fn writes_file_and_returns_public_url() {
        let dir = TempDir::new().unwrap();

        let url = storage(&dir)
            .store("uploads/user-1/1700000000000-shot.png", b"png-bytes", "image/png")
            .await
            .unwrap();

        assert_eq!(
            url,
            "http://localhost:8080/files/uploads/user-1/1700000000000-shot.png"
        );
        let written = std::fs::read(dir.path().join("uploads/user-1/1700000000000-shot.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn rejects_parent_traversal() {
        let dir = TempDir::new().unwrap();

        let err = storage(&dir)
            .store("uploads/../../etc/passwd", b"x", "image/png")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn rejects_absolute_and_empty_paths() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        assert!(storage.store("/tmp/x.png", b"x", "image/png").await.is_err());
        assert!(storage.store("", b"x", "image/png").await.is_err());
    }
}
