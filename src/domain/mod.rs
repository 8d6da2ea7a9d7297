//! Domain layer: pure types and rules, no I/O.

pub mod account;
pub mod billing;
pub mod conversion;
pub mod foundation;
