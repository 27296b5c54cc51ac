//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::{CreateOutcome, UrlRepository};
use crate::error::AppError;

/// Repository backed by a `shortened_urls` table.
///
/// Duplicate detection is delegated to the unique constraint on
/// `original_url`; no in-process locking is needed, concurrent inserts are
/// serialized by the database.
pub struct PgUrlRepository {
    pool: PgPool,
}

impl PgUrlRepository {
    /// Connects to the database and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the database cannot be reached
    /// or migrated. Callers treat this as fatal at startup.
    pub async fn connect(dsn: &str, config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(dsn)
            .await
            .map_err(|e| {
                AppError::unavailable(
                    "Failed to connect to database",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            AppError::unavailable(
                "Failed to run database migrations",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool. Used by tests that manage their own schema.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_code_by_original(&self, original_url: &str) -> Result<Option<String>, AppError> {
        let code = sqlx::query_scalar::<_, String>(
            "SELECT code FROM shortened_urls WHERE original_url = $1",
        )
        .bind(original_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(code)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, record: ShortUrlRecord) -> Result<CreateOutcome, AppError> {
        // ON CONFLICT on original_url keeps the insert + duplicate check a
        // single round-trip; a code collision still trips the unique
        // constraint on `code` and surfaces as Conflict.
        let inserted = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO shortened_urls (id, code, original_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (original_url) DO NOTHING
            RETURNING code
            "#,
        )
        .bind(record.id)
        .bind(&record.code)
        .bind(&record.original_url)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(code) = inserted {
            return Ok(CreateOutcome::Created { code });
        }

        // No row came back, so another record owns this URL. Re-query for
        // its code.
        match self.find_code_by_original(&record.original_url).await? {
            Some(code) => Ok(CreateOutcome::Duplicate { code }),
            // The existing row vanished between insert and lookup.
            None => Err(AppError::internal(
                "Failed to fetch existing short URL",
                json!({ "original_url": record.original_url }),
            )),
        }
    }

    async fn create_batch(&self, records: Vec<ShortUrlRecord>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for record in &records {
            sqlx::query("INSERT INTO shortened_urls (id, code, original_url) VALUES ($1, $2, $3)")
                .bind(record.id)
                .bind(&record.code)
                .bind(&record.original_url)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_original_url(&self, code: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM shortened_urls WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(url)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::unavailable(
                    "Database ping failed",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(())
    }

    async fn close(&self) -> Result<(), AppError> {
        self.pool.close().await;
        Ok(())
    }
}
