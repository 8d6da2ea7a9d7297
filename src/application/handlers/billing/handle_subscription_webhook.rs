//! HandleSubscriptionWebhookHandler - Reconciles Stripe events into user records.
//!
//! Verification comes first and nothing is read or written for an event
//! whose signature does not check out. Verified events are classified into a
//! `SubscriptionEvent`, run through the matching pure transition, and the
//! resulting mutation is applied through the repository.
//!
//! Only checkout completion surfaces storage failures to Stripe. Events
//! correlated by customer reference are logged and acknowledged whatever
//! happens after verification.

use std::sync::Arc;

use crate::domain::account::UserRecord;
use crate::domain::billing::transition::{
    checkout_completed, subscription_created, subscription_deleted, subscription_updated,
};
use crate::domain::billing::{
    InformationalKind, StripeWebhookVerifier, SubscriptionChange, SubscriptionEvent, Transition,
    WebhookError,
};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleSubscriptionWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value.
    pub signature: Option<String>,
}

/// What processing did with a verified event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A mutation was written to the user's record.
    Applied {
        user_id: UserId,
        mutation: &'static str,
    },
    /// No user matched the event's customer reference.
    NoMatchingUser { customer_ref: String },
    /// The event matched a user but requires no change.
    NoChange,
    /// The change could not be applied; logged and acknowledged.
    NotApplied { reason: String },
    /// Logged only.
    Logged(InformationalKind),
}

#[derive(Debug, Clone)]
pub struct HandleSubscriptionWebhookResult {
    pub event_id: String,
    pub event_type: String,
    pub outcome: WebhookOutcome,
}

/// Failure with the event type when the payload got far enough to have one.
#[derive(Debug)]
pub struct WebhookFailure {
    pub error: WebhookError,
    pub event_type: Option<String>,
}

impl WebhookFailure {
    fn unverified(error: WebhookError) -> Self {
        Self {
            error,
            event_type: None,
        }
    }
}

impl From<WebhookError> for WebhookFailure {
    fn from(error: WebhookError) -> Self {
        Self::unverified(error)
    }
}

pub struct HandleSubscriptionWebhookHandler {
    users: Arc<dyn UserRepository>,
    verifier: StripeWebhookVerifier,
}

impl HandleSubscriptionWebhookHandler {
    pub fn new(users: Arc<dyn UserRepository>, verifier: StripeWebhookVerifier) -> Self {
        Self { users, verifier }
    }

    pub async fn handle(
        &self,
        cmd: HandleSubscriptionWebhookCommand,
    ) -> Result<HandleSubscriptionWebhookResult, WebhookFailure> {
        // 1. Verify signature and parse
        let signature = cmd.signature.as_deref().ok_or(WebhookError::MissingSignature)?;
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, signature)
            .map_err(|e| {
                tracing::warn!(error = %e, "webhook rejected");
                WebhookFailure::unverified(e)
            })?;

        let event_type = event.event_type.clone();
        tracing::debug!(
            event_id = %event.id,
            event_type = %event_type,
            created = event.created,
            livemode = event.livemode,
            "webhook verified"
        );
        let with_type = |error: WebhookError| WebhookFailure {
            error,
            event_type: Some(event_type.clone()),
        };

        // 2. Classify and dispatch
        let classified = SubscriptionEvent::from_stripe(&event).map_err(with_type)?;
        let outcome = match classified {
            SubscriptionEvent::CheckoutCompleted {
                user_id,
                customer_ref,
                subscription_ref,
            } => {
                let record = self
                    .users
                    .find_by_id(&user_id)
                    .await
                    .map_err(|e| with_type(WebhookError::Storage(e.to_string())))?
                    .ok_or_else(|| with_type(WebhookError::UserNotFound(user_id.to_string())))?;

                let transition =
                    checkout_completed(&record, &customer_ref, subscription_ref.as_deref());
                self.apply(transition).await.map_err(with_type)?
            }
            SubscriptionEvent::SubscriptionCreated(change) => {
                self.reconcile(&event_type, &change, |record| {
                    Some(subscription_created(record, &change.subscription_ref))
                })
                .await
            }
            SubscriptionEvent::SubscriptionUpdated(change) => {
                self.reconcile(&event_type, &change, |record| {
                    subscription_updated(record, &change.subscription_ref, change.status)
                })
                .await
            }
            SubscriptionEvent::SubscriptionDeleted(change) => {
                self.reconcile(&event_type, &change, |record| Some(subscription_deleted(record)))
                    .await
            }
            SubscriptionEvent::Informational(kind) => {
                log_informational(kind, &event_type, &event.id);
                WebhookOutcome::Logged(kind)
            }
        };

        Ok(HandleSubscriptionWebhookResult {
            event_id: event.id,
            event_type,
            outcome,
        })
    }

    /// Applies a customer-correlated change. Never fails the delivery.
    async fn reconcile<F>(
        &self,
        event_type: &str,
        change: &SubscriptionChange,
        transition: F,
    ) -> WebhookOutcome
    where
        F: FnOnce(&UserRecord) -> Option<Transition>,
    {
        let Some(customer_ref) = change.customer_ref.as_deref() else {
            tracing::warn!(
                event_type,
                subscription_ref = %change.subscription_ref,
                "subscription event has no customer"
            );
            return WebhookOutcome::NotApplied {
                reason: WebhookError::MissingField("customerId").to_string(),
            };
        };

        let record = match self.users.find_by_customer_ref(customer_ref).await {
            Ok(Some(record)) => record,
            Ok(None) => return no_matching_user(event_type, customer_ref, change),
            Err(e) => {
                tracing::error!(event_type, customer_ref, error = %e, "failed to look up customer");
                return WebhookOutcome::NotApplied {
                    reason: e.to_string(),
                };
            }
        };

        match transition(&record) {
            Some(transition) => match self.apply(transition).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(event_type, user_id = %record.id, error = %e, "subscription change not applied");
                    WebhookOutcome::NotApplied {
                        reason: e.to_string(),
                    }
                }
            },
            None => {
                log_inactive_status(&record, change);
                WebhookOutcome::NoChange
            }
        }
    }

    async fn apply(&self, transition: Transition) -> Result<WebhookOutcome, WebhookError> {
        let user_id = transition.record.id;
        let mutation = transition.mutation;

        let found = self
            .users
            .apply_mutation(&user_id, &mutation)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, mutation = mutation.name(), error = %e, "failed to apply subscription change");
                WebhookError::Storage(e.to_string())
            })?;

        if !found {
            return Err(WebhookError::UserNotFound(user_id.to_string()));
        }

        tracing::info!(
            user_id = %user_id,
            mutation = mutation.name(),
            plan = %transition.record.plan,
            "subscription change applied"
        );
        Ok(WebhookOutcome::Applied {
            user_id,
            mutation: mutation.name(),
        })
    }
}

fn no_matching_user(event_type: &str, customer_ref: &str, change: &SubscriptionChange) -> WebhookOutcome {
    tracing::warn!(
        event_type,
        customer_ref,
        subscription_ref = %change.subscription_ref,
        "no user found for customer"
    );
    WebhookOutcome::NoMatchingUser {
        customer_ref: customer_ref.to_string(),
    }
}

fn log_inactive_status(record: &UserRecord, change: &SubscriptionChange) {
    if change.status.is_delinquent() {
        tracing::warn!(
            user_id = %record.id,
            subscription_ref = %change.subscription_ref,
            status = change.status.as_str(),
            "subscription is delinquent"
        );
    } else {
        tracing::info!(
            user_id = %record.id,
            subscription_ref = %change.subscription_ref,
            status = change.status.as_str(),
            "subscription status changed"
        );
    }
}

fn log_informational(kind: InformationalKind, event_type: &str, event_id: &str) {
    match kind {
        InformationalKind::Invoice => tracing::info!(event_type, event_id, "invoice event"),
        InformationalKind::InvoicePaymentFailed => {
            tracing::warn!(event_type, event_id, "invoice payment failed")
        }
        InformationalKind::Payment => tracing::info!(event_type, event_id, "payment event"),
        InformationalKind::Customer => tracing::info!(event_type, event_id, "customer event"),
        InformationalKind::Unhandled => tracing::info!(event_type, event_id, "unhandled event type"),
    }
}
