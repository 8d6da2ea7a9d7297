//! Classification of verified Stripe events into subscription events.

use crate::domain::foundation::UserId;

use super::stripe_event::{CheckoutSessionObject, StripeEvent, SubscriptionObject, SubscriptionStatus};
use super::webhook_errors::WebhookError;

/// Metadata key carrying the user id through checkout.
pub const USER_ID_METADATA_KEY: &str = "userId";

/// Event kinds the subscription handler dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEvent {
    /// `checkout.session.completed`, correlated by user id.
    CheckoutCompleted {
        user_id: UserId,
        customer_ref: String,
        subscription_ref: Option<String>,
    },
    /// `customer.subscription.created`
    SubscriptionCreated(SubscriptionChange),
    /// `customer.subscription.updated`
    SubscriptionUpdated(SubscriptionChange),
    /// `customer.subscription.deleted`
    SubscriptionDeleted(SubscriptionChange),
    /// Events that are acknowledged and logged only.
    Informational(InformationalKind),
}

/// Subscription object fields, correlated by customer reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChange {
    /// `None` when Stripe sent the subscription without a customer.
    pub customer_ref: Option<String>,
    pub subscription_ref: String,
    pub status: SubscriptionStatus,
}

/// Logging category of an event that causes no mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformationalKind {
    Invoice,
    InvoicePaymentFailed,
    Payment,
    Customer,
    Unhandled,
}

impl InformationalKind {
    fn classify(event_type: &str) -> Self {
        match event_type {
            "invoice.created" | "invoice.finalized" | "invoice.paid"
            | "invoice.payment_succeeded" => InformationalKind::Invoice,
            "invoice.payment_failed" => InformationalKind::InvoicePaymentFailed,
            "payment_intent.created"
            | "payment_intent.succeeded"
            | "payment_method.attached"
            | "charge.succeeded" => InformationalKind::Payment,
            "customer.created" | "customer.updated" => InformationalKind::Customer,
            _ => InformationalKind::Unhandled,
        }
    }
}

impl SubscriptionEvent {
    /// Classifies a verified Stripe event.
    ///
    /// Fails when a checkout session lacks the user id metadata or the
    /// customer. A subscription object without a customer still classifies;
    /// the handler acknowledges it without a change.
    pub fn from_stripe(event: &StripeEvent) -> Result<Self, WebhookError> {
        match event.event_type.as_str() {
            "checkout.session.completed" => {
                let session: CheckoutSessionObject = event
                    .deserialize_object()
                    .map_err(|e| WebhookError::ParseError(e.to_string()))?;

                let user_id = session
                    .metadata
                    .get(USER_ID_METADATA_KEY)
                    .and_then(|id| UserId::new(id.as_str()).ok())
                    .ok_or(WebhookError::MissingMetadata(USER_ID_METADATA_KEY))?;
                let customer_ref = session
                    .customer
                    .ok_or(WebhookError::MissingField("customerId"))?;

                Ok(SubscriptionEvent::CheckoutCompleted {
                    user_id,
                    customer_ref,
                    subscription_ref: session.subscription,
                })
            }
            "customer.subscription.created" => {
                Ok(SubscriptionEvent::SubscriptionCreated(subscription_change(event)?))
            }
            "customer.subscription.updated" => {
                Ok(SubscriptionEvent::SubscriptionUpdated(subscription_change(event)?))
            }
            "customer.subscription.deleted" => {
                Ok(SubscriptionEvent::SubscriptionDeleted(subscription_change(event)?))
            }
            other => Ok(SubscriptionEvent::Informational(InformationalKind::classify(other))),
        }
    }
}

fn subscription_change(event: &StripeEvent) -> Result<SubscriptionChange, WebhookError> {
    let subscription: SubscriptionObject = event
        .deserialize_object()
        .map_err(|e| WebhookError::ParseError(e.to_string()))?;

    Ok(SubscriptionChange {
        customer_ref: subscription.customer,
        subscription_ref: subscription.id,
        status: subscription.status,
    })
}
