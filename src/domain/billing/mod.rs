//! Billing domain: checkout rules, Stripe webhook verification and the
//! subscription state machine that reconciles events into user records.

mod checkout;
pub mod stripe_event;
mod subscription_event;
pub mod transition;
mod webhook_errors;
mod webhook_verifier;

pub use checkout::{CheckoutError, CheckoutRequest, CheckoutUrls, DEFAULT_APP_URL};
pub use stripe_event::{StripeEvent, StripeEventData, SubscriptionStatus};
pub use subscription_event::{
    InformationalKind, SubscriptionChange, SubscriptionEvent, USER_ID_METADATA_KEY,
};
pub use transition::{RecordMutation, Transition};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{signature_header, SignatureHeader, StripeWebhookVerifier};
