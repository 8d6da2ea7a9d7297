//! Data Transfer Objects for account endpoints.

use serde::Serialize;

use crate::domain::account::{CreditsRemaining, Plan, UserRecord};

/// Account view. Payment references stay server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub plan: Plan,
    pub free_credits: u32,
    pub credits_used: u32,
    pub total_conversions: u32,
    pub credits_remaining: CreditsRemaining,
    pub has_active_subscription: bool,
    pub created_at: String,
    pub last_login_at: String,
}

impl From<UserRecord> for AccountResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            credits_remaining: record.credits_remaining(),
            has_active_subscription: record.has_active_subscription(),
            user_id: record.id.to_string(),
            email: record.email,
            display_name: record.display_name,
            photo_url: record.photo_url,
            plan: record.plan,
            free_credits: record.free_credits,
            credits_used: record.credits_used,
            total_conversions: record.total_conversions,
            created_at: record.created_at.to_rfc3339(),
            last_login_at: record.last_login_at.to_rfc3339(),
        }
    }
}

/// Response of `POST /account/session`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub created: bool,
    pub account: AccountResponse,
}
