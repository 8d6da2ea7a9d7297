//! Billing handlers.
//!
//! ## Commands
//! - Starting a Pro checkout
//! - Processing Stripe subscription webhooks

mod create_checkout;
mod handle_subscription_webhook;

pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use handle_subscription_webhook::{
    HandleSubscriptionWebhookCommand, HandleSubscriptionWebhookHandler,
    HandleSubscriptionWebhookResult, WebhookFailure, WebhookOutcome,
};
