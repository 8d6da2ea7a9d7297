//! Conversion history queries: the caller's own conversions and the public gallery.

use std::sync::Arc;

use crate::domain::conversion::{ConversionError, ConversionRecord};
use crate::domain::foundation::UserId;
use crate::ports::ConversionRepository;

/// Default page size for a user's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
/// Default page size for the public gallery.
pub const DEFAULT_GALLERY_LIMIT: usize = 20;
/// Upper bound for any requested page size.
pub const MAX_LIST_LIMIT: usize = 100;

fn clamp_limit(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}

/// Query for the caller's conversions, newest first.
#[derive(Debug, Clone)]
pub struct ListConversionsQuery {
    pub user_id: UserId,
    pub limit: Option<usize>,
}

pub struct ListConversionsHandler {
    conversions: Arc<dyn ConversionRepository>,
}

impl ListConversionsHandler {
    pub fn new(conversions: Arc<dyn ConversionRepository>) -> Self {
        Self { conversions }
    }

    pub async fn handle(
        &self,
        query: ListConversionsQuery,
    ) -> Result<Vec<ConversionRecord>, ConversionError> {
        let limit = clamp_limit(query.limit, DEFAULT_HISTORY_LIMIT);
        Ok(self.conversions.list_by_user(&query.user_id, limit).await?)
    }
}

/// Query for public conversions, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListPublicConversionsQuery {
    pub limit: Option<usize>,
}

pub struct ListPublicConversionsHandler {
    conversions: Arc<dyn ConversionRepository>,
}

impl ListPublicConversionsHandler {
    pub fn new(conversions: Arc<dyn ConversionRepository>) -> Self {
        Self { conversions }
    }

    pub async fn handle(
        &self,
        query: ListPublicConversionsQuery,
    ) -> Result<Vec<ConversionRecord>, ConversionError> {
        let limit = clamp_limit(query.limit, DEFAULT_GALLERY_LIMIT);
        Ok(self.conversions.list_public(limit).await?)
    }
}
