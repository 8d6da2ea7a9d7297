//! Account handlers.
//!
//! ## Commands
//! - Provisioning the user record at first authentication
//!
//! ## Queries
//! - The caller's account

mod get_account;
mod provision_user;

pub use get_account::{GetAccountHandler, GetAccountQuery};
pub use provision_user::{ProvisionUserCommand, ProvisionUserHandler, ProvisionUserResult};
