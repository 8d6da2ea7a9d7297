//! Free-tier credit rules.
//!
//! The ledger decision is pure: given a snapshot of a user record it says
//! whether a conversion may proceed and whether a credit must be consumed.
//! The consumption itself happens atomically in the repository.

use serde::{Serialize, Serializer};

use super::{Plan, UserRecord};

/// Credits granted to a new free-tier user and restored on downgrade.
pub const FREE_TIER_CREDITS: u32 = 5;

/// Outcome of checking a record against the credit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditCheck {
    /// Paid plan; proceed without touching the counter.
    Unlimited,
    /// Free plan with at least one credit; one must be consumed.
    Available,
    /// Free plan with nothing left.
    Exhausted,
}

impl CreditCheck {
    /// Evaluates the credit rules for a record snapshot.
    pub fn evaluate(record: &UserRecord) -> Self {
        match record.plan {
            Plan::Pro | Plan::Team => CreditCheck::Unlimited,
            Plan::Free if record.free_credits > 0 => CreditCheck::Available,
            Plan::Free => CreditCheck::Exhausted,
        }
    }
}

/// Remaining credits as reported to clients.
///
/// Serializes as a number for free users and the string `"unlimited"`
/// for paid plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditsRemaining {
    Limited(u32),
    Unlimited,
}

impl CreditsRemaining {
    /// Remaining credits after one conversion, computed from a snapshot
    /// taken before the conversion.
    pub fn after_use(record: &UserRecord) -> Self {
        if record.plan.has_unlimited_credits() {
            CreditsRemaining::Unlimited
        } else {
            CreditsRemaining::Limited(record.free_credits.saturating_sub(1))
        }
    }

    /// Remaining credits as currently stored.
    pub fn current(record: &UserRecord) -> Self {
        if record.plan.has_unlimited_credits() {
            CreditsRemaining::Unlimited
        } else {
            CreditsRemaining::Limited(record.free_credits)
        }
    }
}

impl Serialize for CreditsRemaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CreditsRemaining::Limited(n) => serializer.serialize_u32(*n),
            CreditsRemaining::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}
