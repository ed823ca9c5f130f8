// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ProgressSink, StoreError};
use crate::models::progress::SessionRecord;

/// Progress documents in the Postgres `progress` table.
#[derive(Debug, Clone)]
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<SessionRecord>, StoreError> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT lesson, score, recorded_at, location
            FROM progress
            WHERE identity = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl ProgressSink for PgProgressStore {
    async fn put(&self, key: &str, record: &SessionRecord) -> Result<(), StoreError> {
        // Upsert: the latest attempt replaces the stored one
        sqlx::query(
            r#"
            INSERT INTO progress (identity, lesson, score, recorded_at, location)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (identity) DO UPDATE SET
                lesson = EXCLUDED.lesson,
                score = EXCLUDED.score,
                recorded_at = EXCLUDED.recorded_at,
                location = EXCLUDED.location
            "#,
        )
        .bind(key)
        .bind(&record.lesson)
        .bind(record.score)
        .bind(record.timestamp)
        .bind(&record.location)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert progress record: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(())
    }
}
