//! SnapComponent - Screenshot to React component service
//!
//! Turns UI screenshots into shadcn/ui + Tailwind components through a vision
//! model, meters free-tier usage with a per-user credit ledger and keeps plans
//! in sync with Stripe subscriptions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
