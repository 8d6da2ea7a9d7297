//! PostgreSQL implementation of ConversionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::conversion::ConversionRecord;
use crate::domain::foundation::{ConversionId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ConversionRepository;

pub struct PostgresConversionRepository {
    pool: PgPool,
}

impl PostgresConversionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ConversionRow {
    id: Uuid,
    user_id: String,
    image_url: String,
    generated_code: String,
    is_public: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ConversionRow> for ConversionRecord {
    type Error = DomainError;

    fn try_from(row: ConversionRow) -> Result<Self, Self::Error> {
        Ok(ConversionRecord {
            id: ConversionId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
            })?,
            image_url: row.image_url,
            generated_code: row.generated_code,
            is_public: row.is_public,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn to_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl ConversionRepository for PostgresConversionRepository {
    async fn save(&self, record: &ConversionRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO conversions (id, user_id, image_url, generated_code, is_public, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(&record.image_url)
        .bind(&record.generated_code)
        .bind(record.is_public)
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save conversion: {}", e)))?;

        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ConversionRecord>, DomainError> {
        let rows: Vec<ConversionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, image_url, generated_code, is_public, created_at
            FROM conversions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(to_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list conversions: {}", e)))?;

        rows.into_iter().map(ConversionRecord::try_from).collect()
    }

    async fn list_public(&self, limit: usize) -> Result<Vec<ConversionRecord>, DomainError> {
        let rows: Vec<ConversionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, image_url, generated_code, is_public, created_at
            FROM conversions
            WHERE is_public = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(to_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list public conversions: {}", e)))?;

        rows.into_iter().map(ConversionRecord::try_from).collect()
    }
}
