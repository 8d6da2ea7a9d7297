//! Credit ledger - decides eligibility and consumes one unit of usage.
//!
//! Paid plans pass without any write. Free plans pass only if the
//! repository's conditional decrement succeeds, so two concurrent requests
//! can never both spend the last credit.

use std::sync::Arc;

use crate::domain::account::{CreditCheck, UserRecord};
use crate::domain::conversion::ConversionError;
use crate::ports::UserRepository;

/// What the ledger did for an eligible user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditGrant {
    /// Paid plan; nothing was consumed.
    Unlimited,
    /// One free credit was consumed.
    Consumed,
}

pub struct CreditLedger {
    users: Arc<dyn UserRepository>,
}

impl CreditLedger {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Consumes a credit for a record already read by the caller.
    ///
    /// The snapshot only short-circuits the exhausted case; the decision for
    /// free users is made by the conditional decrement. A decrement that loses
    /// to a concurrent upgrade re-reads the record so the new plan applies.
    pub async fn consume_for(&self, record: &UserRecord) -> Result<CreditGrant, ConversionError> {
        match record.credit_check() {
            CreditCheck::Unlimited => Ok(CreditGrant::Unlimited),
            CreditCheck::Exhausted => Err(ConversionError::quota_exceeded(record.id.clone())),
            CreditCheck::Available => {
                if self.users.decrement_free_credit(&record.id).await? {
                    return Ok(CreditGrant::Consumed);
                }
                let current = self
                    .users
                    .find_by_id(&record.id)
                    .await?
                    .ok_or_else(|| ConversionError::not_found(record.id.clone()))?;
                match current.credit_check() {
                    CreditCheck::Unlimited => {
                        tracing::debug!(user_id = %record.id, plan = %current.plan, "plan changed during credit check");
                        Ok(CreditGrant::Unlimited)
                    }
                    _ => Err(ConversionError::quota_exceeded(record.id.clone())),
                }
            }
        }
    }
}
