//! User record aggregate.

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};

use super::{CreditCheck, CreditsRemaining, Plan, FREE_TIER_CREDITS};

/// Plan and credit state of a single user.
///
/// Created at first authentication, mutated by credit consumption and by
/// subscription events, never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub plan: Plan,
    /// Only meaningful while `plan` is `Free`.
    pub free_credits: u32,
    pub credits_used: u32,
    pub total_conversions: u32,
    pub payment_customer_ref: Option<String>,
    pub payment_subscription_ref: Option<String>,
    pub created_at: Timestamp,
    pub last_login_at: Timestamp,
}

impl UserRecord {
    /// Creates a free-tier record with the starting credit grant.
    pub fn new_free(id: UserId, email: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: None,
            photo_url: None,
            plan: Plan::Free,
            free_credits: FREE_TIER_CREDITS,
            credits_used: 0,
            total_conversions: 0,
            payment_customer_ref: None,
            payment_subscription_ref: None,
            created_at: now,
            last_login_at: now,
        }
    }

    /// Creates the first record for a freshly authenticated user.
    pub fn provision(user: &AuthenticatedUser, now: Timestamp) -> Self {
        let mut record = Self::new_free(user.id.clone(), user.email.clone(), now);
        record.display_name = user.display_name.clone();
        record.photo_url = user.photo_url.clone();
        record
    }

    pub fn credit_check(&self) -> CreditCheck {
        CreditCheck::evaluate(self)
    }

    pub fn credits_remaining(&self) -> CreditsRemaining {
        CreditsRemaining::current(self)
    }

    /// A subscription counts as active while the plan is paid and a
    /// subscription reference is on file.
    pub fn has_active_subscription(&self) -> bool {
        self.plan.is_paid() && self.payment_subscription_ref.is_some()
    }

    /// Consumes one free credit if the rules allow it.
    ///
    /// Returns false and leaves the record untouched when the plan is paid
    /// or no credit remains. Callers must hold exclusive access to the
    /// record for the whole call.
    pub fn consume_free_credit(&mut self) -> bool {
        if self.plan != Plan::Free || self.free_credits == 0 {
            return false;
        }
        self.free_credits -= 1;
        self.credits_used += 1;
        true
    }
}
