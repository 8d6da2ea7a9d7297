//! Pure subscription state transitions.
//!
//! Each transition takes the current record and returns the record as it
//! will look afterwards together with the targeted mutation the repository
//! must apply. Mutations set absolute values so replays are harmless.

use crate::domain::account::{Plan, UserRecord, FREE_TIER_CREDITS};

use super::stripe_event::SubscriptionStatus;

/// Field-level change to a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordMutation {
    /// `plan = pro`, store customer ref, store subscription ref when known.
    UpgradeToPro {
        customer_ref: String,
        subscription_ref: Option<String>,
    },
    /// Store the subscription ref only.
    AttachSubscription { subscription_ref: String },
    /// `plan = pro`, store the subscription ref.
    ActivateSubscription { subscription_ref: String },
    /// `plan = free`, reset credits, clear the subscription ref.
    DowngradeToFree { free_credits: u32 },
}

impl RecordMutation {
    /// Applies the mutation in place. Fields it does not name are untouched.
    pub fn apply_to(&self, record: &mut UserRecord) {
        match self {
            RecordMutation::UpgradeToPro {
                customer_ref,
                subscription_ref,
            } => {
                record.plan = Plan::Pro;
                record.payment_customer_ref = Some(customer_ref.clone());
                if let Some(subscription_ref) = subscription_ref {
                    record.payment_subscription_ref = Some(subscription_ref.clone());
                }
            }
            RecordMutation::AttachSubscription { subscription_ref } => {
                record.payment_subscription_ref = Some(subscription_ref.clone());
            }
            RecordMutation::ActivateSubscription { subscription_ref } => {
                record.plan = Plan::Pro;
                record.payment_subscription_ref = Some(subscription_ref.clone());
            }
            RecordMutation::DowngradeToFree { free_credits } => {
                record.plan = Plan::Free;
                record.free_credits = *free_credits;
                record.payment_subscription_ref = None;
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecordMutation::UpgradeToPro { .. } => "upgrade_to_pro",
            RecordMutation::AttachSubscription { .. } => "attach_subscription",
            RecordMutation::ActivateSubscription { .. } => "activate_subscription",
            RecordMutation::DowngradeToFree { .. } => "downgrade_to_free",
        }
    }
}

/// Result of a transition: the projected record and the change to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub record: UserRecord,
    pub mutation: RecordMutation,
}

impl Transition {
    fn from_mutation(current: &UserRecord, mutation: RecordMutation) -> Self {
        let mut record = current.clone();
        mutation.apply_to(&mut record);
        Self { record, mutation }
    }
}

/// Checkout completed for this user.
pub fn checkout_completed(
    current: &UserRecord,
    customer_ref: &str,
    subscription_ref: Option<&str>,
) -> Transition {
    Transition::from_mutation(
        current,
        RecordMutation::UpgradeToPro {
            customer_ref: customer_ref.to_string(),
            subscription_ref: subscription_ref.map(str::to_string),
        },
    )
}

/// Subscription created for this user's customer.
pub fn subscription_created(current: &UserRecord, subscription_ref: &str) -> Transition {
    Transition::from_mutation(
        current,
        RecordMutation::AttachSubscription {
            subscription_ref: subscription_ref.to_string(),
        },
    )
}

/// Subscription updated. Only `active` changes the record.
pub fn subscription_updated(
    current: &UserRecord,
    subscription_ref: &str,
    status: SubscriptionStatus,
) -> Option<Transition> {
    match status {
        SubscriptionStatus::Active => Some(Transition::from_mutation(
            current,
            RecordMutation::ActivateSubscription {
                subscription_ref: subscription_ref.to_string(),
            },
        )),
        _ => None,
    }
}

/// Subscription deleted; back to the free tier with a fresh grant.
pub fn subscription_deleted(current: &UserRecord) -> Transition {
    Transition::from_mutation(
        current,
        RecordMutation::DowngradeToFree {
            free_credits: FREE_TIER_CREDITS,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use proptest::prelude::*;

    fn free_user() -> UserRecord {
        UserRecord::new_free(
            UserId::new("user-1").unwrap(),
            "user@example.com",
            Timestamp::now(),
        )
    }

    #[test]
    fn checkout_upgrades_and_stores_refs() {
        let t = checkout_completed(&free_user(), "cus_1", Some("sub_1"));

        assert_eq!(t.record.plan, Plan::Pro);
        assert_eq!(t.record.payment_customer_ref.as_deref(), Some("cus_1"));
        assert_eq!(t.record.payment_subscription_ref.as_deref(), Some("sub_1"));
        assert_eq!(t.mutation.name(), "upgrade_to_pro");
    }

    #[test]
    fn checkout_without_subscription_keeps_existing_ref() {
        let mut user = free_user();
        user.payment_subscription_ref = Some("sub_old".to_string());

        let t = checkout_completed(&user, "cus_1", None);

        assert_eq!(t.record.payment_subscription_ref.as_deref(), Some("sub_old"));
    }

    #[test]
    fn checkout_leaves_credit_counters_alone() {
        let mut user = free_user();
        user.free_credits = 2;
        user.credits_used = 3;

        let t = checkout_completed(&user, "cus_1", Some("sub_1"));

        assert_eq!(t.record.free_credits, 2);
        assert_eq!(t.record.credits_used, 3);
    }

    #[test]
    fn created_attaches_subscription_only() {
        let upgraded = checkout_completed(&free_user(), "cus_1", None).record;

        let t = subscription_created(&upgraded, "sub_2");

        assert_eq!(t.record.plan, Plan::Pro);
        assert_eq!(t.record.payment_customer_ref.as_deref(), Some("cus_1"));
        assert_eq!(t.record.payment_subscription_ref.as_deref(), Some("sub_2"));
        assert_eq!(
            t.mutation,
            RecordMutation::AttachSubscription {
                subscription_ref: "sub_2".to_string()
            }
        );
    }

    #[test]
    fn created_does_not_change_plan_of_free_user() {
        let t = subscription_created(&free_user(), "sub_2");
        assert_eq!(t.record.plan, Plan::Free);
    }

    #[test]
    fn updated_active_activates_pro() {
        let t = subscription_updated(&free_user(), "sub_3", SubscriptionStatus::Active).unwrap();

        assert_eq!(t.record.plan, Plan::Pro);
        assert_eq!(t.record.payment_subscription_ref.as_deref(), Some("sub_3"));
    }

    #[test]
    fn updated_other_statuses_do_nothing() {
        for status in [
            SubscriptionStatus::Canceled,
            SubscriptionStatus::Unpaid,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Trialing,
            SubscriptionStatus::Unknown,
        ] {
            assert!(subscription_updated(&free_user(), "sub_3", status).is_none());
        }
    }

    #[test]
    fn deleted_downgrades_and_clears_subscription() {
        let mut user = checkout_completed(&free_user(), "cus_1", Some("sub_1")).record;
        user.free_credits = 0;

        let t = subscription_deleted(&user);

        assert_eq!(t.record.plan, Plan::Free);
        assert_eq!(t.record.free_credits, 5);
        assert!(t.record.payment_subscription_ref.is_none());
        assert_eq!(t.record.payment_customer_ref.as_deref(), Some("cus_1"));
    }

    #[test]
    fn deleted_is_idempotent() {
        let once = subscription_deleted(&free_user()).record;
        let twice = subscription_deleted(&once).record;
        assert_eq!(once, twice);
    }

    proptest! {
        #[test]
        fn deleted_resets_credits_regardless_of_prior_value(credits in 0u32..1_000, used in 0u32..1_000) {
            let mut user = free_user();
            user.plan = Plan::Pro;
            user.free_credits = credits;
            user.credits_used = used;

            let t = subscription_deleted(&user);

            prop_assert_eq!(t.record.free_credits, FREE_TIER_CREDITS);
            prop_assert_eq!(t.record.credits_used, used);
        }
    }
}
