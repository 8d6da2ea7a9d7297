//! In-memory conversion store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversion::ConversionRecord;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ConversionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryConversionRepository {
    records: Arc<RwLock<Vec<ConversionRecord>>>,
    fail_saves: Arc<RwLock<bool>>,
}

impl InMemoryConversionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail with a database error.
    pub async fn fail_saves(&self, fail: bool) {
        *self.fail_saves.write().await = fail;
    }

    pub async fn all(&self) -> Vec<ConversionRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// Ties on `created_at` go to the later insert.
fn newest_first(mut records: Vec<ConversionRecord>, limit: usize) -> Vec<ConversionRecord> {
    records.reverse();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records.truncate(limit);
    records
}

#[async_trait]
impl ConversionRepository for InMemoryConversionRepository {
    async fn save(&self, record: &ConversionRecord) -> Result<(), DomainError> {
        if *self.fail_saves.read().await {
            return Err(DomainError::database("conversion store unavailable"));
        }
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ConversionRecord>, DomainError> {
        let records = self.records.read().await;
        let mine = records
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(mine, limit))
    }

    async fn list_public(&self, limit: usize) -> Result<Vec<ConversionRecord>, DomainError> {
        let records = self.records.read().await;
        let public = records.iter().filter(|r| r.is_public).cloned().collect();
        Ok(newest_first(public, limit))
    }
}
