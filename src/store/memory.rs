use crate::domain::entity::{CacheEntry, EntityKey};
use crate::error::{RatingError, Result};
use crate::store::RatingStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store with switches for simulating an unhealthy database.
#[derive(Clone, Default)]
pub struct InMemoryRatingStore {
    entries: Arc<RwLock<HashMap<EntityKey, CacheEntry>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    read_delay_ms: Arc<AtomicU64>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, entry: CacheEntry) {
        self.entries.write().await.insert(entry.key.clone(), entry);
    }

    pub async fn snapshot(&self, key: &EntityKey) -> Option<CacheEntry> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_read_delay(&self, delay: std::time::Duration) {
        self.read_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Upserts attempted so far, including rejected ones.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RatingStore for InMemoryRatingStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &EntityKey) -> Result<Option<CacheEntry>> {
        let delay = self.read_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RatingError::StorageRead("memory store reads disabled".into()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn upsert(&self, key: &EntityKey, rating: f64, checked_at: DateTime<Utc>) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RatingError::StorageWrite("memory store writes disabled".into()));
        }

        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(existing) if existing.last_checked > checked_at => {}
            Some(existing) => {
                existing.rating = rating;
                existing.last_checked = checked_at;
            }
            None => {
                entries.insert(
                    key.clone(),
                    CacheEntry {
                        key: key.clone(),
                        rating,
                        last_checked: checked_at,
                    },
                );
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RatingError::StorageRead("memory store reads disabled".into()));
        }
        Ok(())
    }
}
