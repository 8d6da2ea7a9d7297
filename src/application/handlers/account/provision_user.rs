//! ProvisionUserHandler - Creates the user record at first authentication.
//!
//! Later sessions only refresh `last_login_at`.

use std::sync::Arc;

use crate::domain::account::UserRecord;
use crate::domain::conversion::ConversionError;
use crate::domain::foundation::{AuthenticatedUser, ErrorCode, Timestamp};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct ProvisionUserCommand {
    pub user: AuthenticatedUser,
}

#[derive(Debug, Clone)]
pub struct ProvisionUserResult {
    pub record: UserRecord,
    /// True when this call created the record.
    pub created: bool,
}

pub struct ProvisionUserHandler {
    users: Arc<dyn UserRepository>,
}

impl ProvisionUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: ProvisionUserCommand,
    ) -> Result<ProvisionUserResult, ConversionError> {
        let now = Timestamp::now();

        if let Some(mut existing) = self.users.find_by_id(&cmd.user.id).await? {
            self.users.touch_last_login(&existing.id, now).await?;
            existing.last_login_at = now;
            return Ok(ProvisionUserResult {
                record: existing,
                created: false,
            });
        }

        let record = UserRecord::provision(&cmd.user, now);
        match self.users.create(&record).await {
            Ok(()) => {
                tracing::info!(user_id = %record.id, "user provisioned");
                Ok(ProvisionUserResult {
                    record,
                    created: true,
                })
            }
            // Lost a race with a concurrent first login; the other request created it.
            Err(e) if e.code == ErrorCode::UserExists => {
                self.users.touch_last_login(&record.id, now).await?;
                let existing = self
                    .users
                    .find_by_id(&record.id)
                    .await?
                    .ok_or_else(|| ConversionError::not_found(record.id.clone()))?;
                Ok(ProvisionUserResult {
                    record: existing,
                    created: false,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
