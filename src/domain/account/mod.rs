//! Account domain: plans, user records and free-tier credits.

mod credits;
mod plan;
mod user_record;

pub use credits::{CreditCheck, CreditsRemaining, FREE_TIER_CREDITS};
pub use plan::Plan;
pub use user_record::UserRecord;
