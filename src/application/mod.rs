//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod credit_ledger;
pub mod handlers;

pub use credit_ledger::{CreditGrant, CreditLedger};
pub use handlers::*;
