//! User record store port.
//!
//! The user row is the only state shared between the conversion pipeline
//! and the subscription webhook, so every write here is targeted: no method
//! overwrites a whole record from a stale snapshot.

use async_trait::async_trait;

use crate::domain::account::UserRecord;
use crate::domain::billing::RecordMutation;
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Repository port for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError>;

    /// Find the user owning a payment customer reference.
    async fn find_by_customer_ref(
        &self,
        customer_ref: &str,
    ) -> Result<Option<UserRecord>, DomainError>;

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// - `UserExists` if a record with this id already exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, record: &UserRecord) -> Result<(), DomainError>;

    /// Refresh `last_login_at` only.
    async fn touch_last_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError>;

    /// Atomically consume one free credit.
    ///
    /// Decrements `free_credits` and increments `credits_used` if and only
    /// if the user is on the free plan with `free_credits > 0`. Returns
    /// whether a credit was consumed.
    async fn decrement_free_credit(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Apply a subscription mutation. Returns false if the user is missing.
    async fn apply_mutation(
        &self,
        id: &UserId,
        mutation: &RecordMutation,
    ) -> Result<bool, DomainError>;

    /// Increment `total_conversions` by one.
    async fn increment_total_conversions(&self, id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn UserRepository>();
    }
}
