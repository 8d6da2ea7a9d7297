//! Conversion record store port. Records are append-only.

use async_trait::async_trait;

use crate::domain::conversion::ConversionRecord;
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait ConversionRepository: Send + Sync {
    /// Append a record.
    async fn save(&self, record: &ConversionRecord) -> Result<(), DomainError>;

    /// A user's conversions, newest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ConversionRecord>, DomainError>;

    /// Public conversions, newest first.
    async fn list_public(&self, limit: usize) -> Result<Vec<ConversionRecord>, DomainError>;
}
