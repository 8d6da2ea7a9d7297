//! PostgreSQL implementation of UserRepository.
//!
//! Credit consumption is one conditional `UPDATE`; subscription mutations
//! touch only the columns they name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::account::{Plan, UserRecord};
use crate::domain::billing::RecordMutation;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserRepository;

const USER_COLUMNS: &str = "id, email, display_name, photo_url, plan, free_credits, credits_used, \
     total_conversions, stripe_customer_id, stripe_subscription_id, created_at, last_login_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    display_name: Option<String>,
    photo_url: Option<String>,
    plan: String,
    free_credits: i32,
    credits_used: i32,
    total_conversions: i32,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    created_at: DateTime<Utc>,
    last_login_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let plan: Plan = row.plan.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid plan value: {}", e))
        })?;

        Ok(UserRecord {
            id: UserId::new(row.id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
            })?,
            email: row.email,
            display_name: row.display_name,
            photo_url: row.photo_url,
            plan,
            free_credits: non_negative(row.free_credits),
            credits_used: non_negative(row.credits_used),
            total_conversions: non_negative(row.total_conversions),
            payment_customer_ref: row.stripe_customer_id,
            payment_subscription_ref: row.stripe_subscription_id,
            created_at: Timestamp::from_datetime(row.created_at),
            last_login_at: Timestamp::from_datetime(row.last_login_at),
        })
    }
}

fn non_negative(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find user", e))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_customer_ref(
        &self,
        customer_ref: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE stripe_customer_id = $1 LIMIT 1",
            USER_COLUMNS
        ))
        .bind(customer_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find user by customer", e))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn create(&self, record: &UserRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, display_name, photo_url, plan, free_credits, credits_used,
                total_conversions, stripe_customer_id, stripe_subscription_id,
                created_at, last_login_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(record.id.as_str())
        .bind(&record.email)
        .bind(&record.display_name)
        .bind(&record.photo_url)
        .bind(record.plan.as_str())
        .bind(to_db_int(record.free_credits))
        .bind(to_db_int(record.credits_used))
        .bind(to_db_int(record.total_conversions))
        .bind(&record.payment_customer_ref)
        .bind(&record.payment_subscription_ref)
        .bind(record.created_at.as_datetime())
        .bind(record.last_login_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_pkey") {
                    return DomainError::new(
                        ErrorCode::UserExists,
                        format!("User {} already exists", record.id),
                    );
                }
            }
            db_error("Failed to create user", e)
        })?;

        Ok(())
    }

    async fn touch_last_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update last login", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        Ok(())
    }

    async fn decrement_free_credit(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                free_credits = free_credits - 1,
                credits_used = credits_used + 1
            WHERE id = $1 AND plan = 'free' AND free_credits > 0
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to consume credit", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn apply_mutation(
        &self,
        id: &UserId,
        mutation: &RecordMutation,
    ) -> Result<bool, DomainError> {
        let query = match mutation {
            RecordMutation::UpgradeToPro {
                customer_ref,
                subscription_ref,
            } => sqlx::query(
                r#"
                UPDATE users SET
                    plan = 'pro',
                    stripe_customer_id = $2,
                    stripe_subscription_id = COALESCE($3, stripe_subscription_id)
                WHERE id = $1
                "#,
            )
            .bind(id.as_str())
            .bind(customer_ref)
            .bind(subscription_ref),
            RecordMutation::AttachSubscription { subscription_ref } => {
                sqlx::query("UPDATE users SET stripe_subscription_id = $2 WHERE id = $1")
                    .bind(id.as_str())
                    .bind(subscription_ref)
            }
            RecordMutation::ActivateSubscription { subscription_ref } => sqlx::query(
                "UPDATE users SET plan = 'pro', stripe_subscription_id = $2 WHERE id = $1",
            )
            .bind(id.as_str())
            .bind(subscription_ref),
            RecordMutation::DowngradeToFree { free_credits } => sqlx::query(
                r#"
                UPDATE users SET
                    plan = 'free',
                    free_credits = $2,
                    stripe_subscription_id = NULL
                WHERE id = $1
                "#,
            )
            .bind(id.as_str())
            .bind(to_db_int(*free_credits)),
        };

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to apply subscription change", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_total_conversions(&self, id: &UserId) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET total_conversions = total_conversions + 1 WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to increment conversions", e))?;
        Ok(())
    }
}
