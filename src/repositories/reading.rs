use std::sync::Arc;

use sqlx::Error;
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::Reading;

pub struct ReadingRepository {
    storage: Arc<Storage>,
}

impl ReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    // Append one reading; the timestamp is assigned here, not by the caller.
    pub async fn create(
        &self,
        temperature: f64,
        humidity: f64,
        air_quality: Option<f64>,
    ) -> Result<Reading, Error> {
        let reading: Reading = sqlx::query_as(
            r#"
            INSERT INTO readings (temperature, humidity, air_quality, time)
                VALUES ($1, $2, $3, $4)
                RETURNING *;
            "#,
        )
        .bind(temperature)
        .bind(humidity)
        .bind(air_quality)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(reading)
    }

    // Get the latest N readings, newest first. Ties on the timestamp fall
    // back to insertion order.
    pub async fn find_latest(&self, limit: i64) -> Result<Vec<Reading>, Error> {
        let readings: Vec<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            ORDER BY time DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }

    // Get the single newest reading, if any exists.
    pub async fn find_newest(&self) -> Result<Option<Reading>, Error> {
        let reading: Option<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            ORDER BY time DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(reading)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM readings")
            .fetch_one(self.storage.get_pool())
            .await?;

        Ok(count)
    }

    // Delete all readings before a given time (retention sweep)
    pub async fn delete_older_than(&self, cutoff: OffsetDateTime) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM readings WHERE time < $1")
            .bind(cutoff)
            .execute(self.storage.get_pool())
            .await?;

        Ok(result.rows_affected())
    }

    // Delete everything but the newest `max_rows` readings (retention sweep)
    pub async fn trim_to_cap(&self, max_rows: i64) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM readings
            WHERE id NOT IN (
                SELECT id FROM readings
                ORDER BY time DESC, id DESC
                LIMIT $1
            )
            "#,
        )
        .bind(max_rows)
        .execute(self.storage.get_pool())
        .await?;

        Ok(result.rows_affected())
    }
}
