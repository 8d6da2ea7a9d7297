//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod billing;
pub mod conversion;

pub use account::*;
pub use billing::*;
pub use conversion::*;
