use crate::config::AppConfig;
use crate::domain::entity::{CacheEntry, EntityKey};
use crate::error::{RatingError, Result};
use crate::store::RatingStore;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgRatingStore {
    pub pool: PgPool,
}

impl PgRatingStore {
    pub async fn connect(cfg: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.db_max_connections)
            .acquire_timeout(std::time::Duration::from_millis(cfg.db_acquire_timeout_ms))
            .connect(&cfg.database_url)
            .await?;
        let store = Self { pool };
        store.ping().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Fixed-width RFC 3339, so text order in the column matches time order.
pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RatingError::StorageRead(Box::new(e)))
}

#[async_trait::async_trait]
impl RatingStore for PgRatingStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn get(&self, key: &EntityKey) -> Result<Option<CacheEntry>> {
        let row = sqlx::query(
            "SELECT rating, last_checked FROM ratings WHERE first_name=$1 AND last_name=$2",
        )
        .bind(key.first_name())
        .bind(key.last_name())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RatingError::StorageRead(Box::new(e)))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let rating: f64 = row
            .try_get("rating")
            .map_err(|e| RatingError::StorageRead(Box::new(e)))?;
        let last_checked: String = row
            .try_get("last_checked")
            .map_err(|e| RatingError::StorageRead(Box::new(e)))?;

        Ok(Some(CacheEntry {
            key: key.clone(),
            rating,
            last_checked: decode_timestamp(&last_checked)?,
        }))
    }

    async fn upsert(&self, key: &EntityKey, rating: f64, checked_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings (first_name, last_name, rating, last_checked)
            VALUES ($1,$2,$3,$4)
            ON CONFLICT (first_name, last_name) DO UPDATE SET
                rating=EXCLUDED.rating,
                last_checked=EXCLUDED.last_checked
            WHERE ratings.last_checked <= EXCLUDED.last_checked
            "#,
        )
        .bind(key.first_name())
        .bind(key.last_name())
        .bind(rating)
        .bind(encode_timestamp(checked_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RatingError::StorageWrite(Box::new(e)))?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RatingError::StorageRead(Box::new(e)))?;
        Ok(())
    }
}
