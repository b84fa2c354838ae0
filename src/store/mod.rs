use crate::domain::entity::{CacheEntry, EntityKey};
use crate::error::Result;
use chrono::{DateTime, Utc};

pub mod memory;
pub mod postgres;

#[async_trait::async_trait]
pub trait RatingStore: Send + Sync {
    fn name(&self) -> &'static str;

    async fn get(&self, key: &EntityKey) -> Result<Option<CacheEntry>>;

    /// Insert, or overwrite rating and timestamp of the existing row. A write older than
    /// the stored `last_checked` is ignored.
    async fn upsert(&self, key: &EntityKey, rating: f64, checked_at: DateTime<Utc>) -> Result<()>;

    async fn ping(&self) -> Result<()>;
}
