//! In-memory user record store.
//!
//! Every write takes the map's write lock for its whole duration, which is
//! what makes `decrement_free_credit` a single atomic check-and-update.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::UserRecord;
use crate::domain::billing::RecordMutation;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserRepository;

/// In-memory user repository for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record, replacing any existing one with the same id.
    pub async fn insert(&self, record: UserRecord) {
        self.users.write().await.insert(record.id.clone(), record);
    }

    /// Returns a copy of a stored record.
    pub async fn get(&self, id: &UserId) -> Option<UserRecord> {
        self.users.read().await.get(id).cloned()
    }

    /// Make mutations fail with a database error. Credit decrements are unaffected.
    pub async fn fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_customer_ref(
        &self,
        customer_ref: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.payment_customer_ref.as_deref() == Some(customer_ref))
            .cloned())
    }

    async fn create(&self, record: &UserRecord) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&record.id) {
            return Err(DomainError::new(
                ErrorCode::UserExists,
                format!("User {} already exists", record.id),
            ));
        }
        users.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn touch_last_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))?;
        user.last_login_at = at;
        Ok(())
    }

    async fn decrement_free_credit(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users
            .get_mut(id)
            .map(UserRecord::consume_free_credit)
            .unwrap_or(false))
    }

    async fn apply_mutation(
        &self,
        id: &UserId,
        mutation: &RecordMutation,
    ) -> Result<bool, DomainError> {
        if *self.fail_writes.read().await {
            return Err(DomainError::database("simulated write failure"));
        }
        let mut users = self.users.write().await;
        match users.get_mut(id) {
            Some(user) => {
                mutation.apply_to(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_total_conversions(&self, id: &UserId) -> Result<(), DomainError> {
        if let Some(user) = self.users.write().await.get_mut(id) {
            user.total_conversions += 1;
        }
        Ok(())
    }
}
