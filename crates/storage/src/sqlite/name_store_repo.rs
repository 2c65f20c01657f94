use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{NameStore, StorageError};

use super::SqliteRepository;

const TAKER_NAME_KEY: &str = "taker_name";

#[async_trait]
impl NameStore for SqliteRepository {
    async fn get_taker_name(&self) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?1")
            .bind(TAKER_NAME_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        row.try_get::<String, _>("value")
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_taker_name(&self, name: Option<&str>) -> Result<(), StorageError> {
        let Some(name) = name else {
            sqlx::query("DELETE FROM preferences WHERE key = ?1")
                .bind(TAKER_NAME_KEY)
                .execute(&self.pool)
                .await
                .map_err(|err| StorageError::Connection(err.to_string()))?;
            return Ok(());
        };

        sqlx::query(
            r"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(TAKER_NAME_KEY)
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
