//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for hosted Checkout Sessions.
//! Webhook signature verification and event parsing live in
//! `domain::billing`, since they need no network access.
//!
//! # Configuration
//!
//! - `SNAP_COMPONENT__PAYMENT__STRIPE_API_KEY`: Stripe secret API key
//! - `SNAP_COMPONENT__PAYMENT__STRIPE_WEBHOOK_SECRET`: Webhook signing secret (whsec_...)

mod mock_payment_provider;
mod stripe_adapter;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
