use crate::domain::entity::{CacheEntry, EntityKey};
use crate::domain::rating::{CacheOutcome, RatingOrigin, RatingResult, Resolution, FALLBACK_RATING};
use crate::error::{RatingError, Result};
use crate::service::reconciler::{receive_fetch, Reconciler};
use crate::sources::RatingSource;
use crate::store::RatingStore;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Races a cache read against a live fetch for every request. Holds no per-request state.
#[derive(Clone)]
pub struct RatingResolver {
    pub store: Arc<dyn RatingStore>,
    pub source: Arc<dyn RatingSource>,
    pub reconciler: Reconciler,
    pub ttl: Duration,
}

impl RatingResolver {
    pub fn new(store: Arc<dyn RatingStore>, source: Arc<dyn RatingSource>, ttl: Duration) -> Self {
        Self {
            reconciler: Reconciler::new(store.clone()),
            store,
            source,
            ttl,
        }
    }

    pub async fn resolve(&self, key: EntityKey) -> Resolution {
        let lookup = self.spawn_lookup(&key);
        // Owns its own write-back, so the cache still warms if this request is dropped.
        let (write_back, fetched) = self
            .reconciler
            .fetch_and_reconcile(self.source.clone(), key.clone());

        let outcome = classify(lookup.await, self.ttl, Utc::now());
        log_cache_outcome(&key, &outcome);

        if let CacheOutcome::Fresh(entry) = outcome {
            return Resolution {
                result: RatingResult {
                    rating: entry.rating,
                    origin: RatingOrigin::Cache,
                },
                write_back,
            };
        }

        let result = match receive_fetch(fetched).await {
            Ok(rating) => RatingResult {
                rating,
                origin: RatingOrigin::Live,
            },
            Err(err) => {
                tracing::warn!(
                    first_name = key.first_name(),
                    last_name = key.last_name(),
                    kind = err.kind(),
                    source = self.source.name(),
                    "answering with fallback rating"
                );
                RatingResult {
                    rating: FALLBACK_RATING,
                    origin: RatingOrigin::Fallback,
                }
            }
        };
        Resolution {
            result,
            write_back,
        }
    }

    fn spawn_lookup(&self, key: &EntityKey) -> JoinHandle<Result<Option<CacheEntry>>> {
        let store = self.store.clone();
        let key = key.clone();
        tokio::spawn(async move { store.get(&key).await })
    }
}

fn classify(
    lookup: std::result::Result<Result<Option<CacheEntry>>, tokio::task::JoinError>,
    ttl: Duration,
    now: DateTime<Utc>,
) -> CacheOutcome {
    match lookup {
        Ok(Ok(Some(entry))) if entry.is_fresh(ttl, now) => CacheOutcome::Fresh(entry),
        Ok(Ok(Some(entry))) => CacheOutcome::Stale(entry),
        Ok(Ok(None)) => CacheOutcome::Miss,
        Ok(Err(err)) => CacheOutcome::Unavailable(err),
        Err(join_err) => CacheOutcome::Unavailable(RatingError::StorageRead(Box::new(join_err))),
    }
}

fn log_cache_outcome(key: &EntityKey, outcome: &CacheOutcome) {
    match outcome {
        CacheOutcome::Fresh(entry) | CacheOutcome::Stale(entry) => {
            tracing::debug!(
                first_name = key.first_name(),
                last_name = key.last_name(),
                last_checked = %entry.last_checked,
                cache = outcome.label(),
                "cache lookup"
            );
        }
        CacheOutcome::Miss => {
            tracing::debug!(
                first_name = key.first_name(),
                last_name = key.last_name(),
                kind = "lookup_miss",
                "no cached rating"
            );
        }
        CacheOutcome::Unavailable(err) => {
            tracing::warn!(
                first_name = key.first_name(),
                last_name = key.last_name(),
                kind = err.kind(),
                "cache lookup failed, falling through to live fetch: {}",
                err
            );
        }
    }
}
