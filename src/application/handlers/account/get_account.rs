//! GetAccountHandler - Query for the caller's user record.

use std::sync::Arc;

use crate::domain::account::UserRecord;
use crate::domain::conversion::ConversionError;
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetAccountQuery {
    pub user_id: UserId,
}

pub struct GetAccountHandler {
    users: Arc<dyn UserRepository>,
}

impl GetAccountHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetAccountQuery) -> Result<UserRecord, ConversionError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or(ConversionError::NotFound(query.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn returns_stored_record() {
        let users = InMemoryUserRepository::new();
        let id = UserId::new("user-1").unwrap();
        users
            .insert(UserRecord::new_free(id.clone(), "a@b.c", Timestamp::now()))
            .await;

        let record = GetAccountHandler::new(Arc::new(users))
            .handle(GetAccountQuery { user_id: id.clone() })
            .await
            .unwrap();

        assert_eq!(record.id, id);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let err = GetAccountHandler::new(Arc::new(InMemoryUserRepository::new()))
            .handle(GetAccountQuery {
                user_id: UserId::new("ghost").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::NotFound(_)));
    }
}
