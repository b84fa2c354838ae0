use crate::domain::entity::EntityKey;
use crate::error::{RatingError, Result};
use crate::sources::RatingSource;
use crate::store::RatingStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Detached cache write-back. Outcomes are logged, never returned to a caller.
#[derive(Clone)]
pub struct Reconciler {
    pub store: Arc<dyn RatingStore>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn RatingStore>) -> Self {
        Self { store }
    }

    /// Fetches the live rating and stores it on success, independently of whoever is waiting on
    /// the receiver. The write happens even if the receiver has been dropped.
    pub fn fetch_and_reconcile(
        &self,
        source: Arc<dyn RatingSource>,
        key: EntityKey,
    ) -> (JoinHandle<()>, oneshot::Receiver<Result<f64>>) {
        let (tx, rx) = oneshot::channel();
        let store = self.store.clone();
        let handle = tokio::spawn(async move {
            match source.fetch(&key).await {
                Ok(rating) => {
                    let checked_at = Utc::now();
                    let _ = tx.send(Ok(rating));
                    write_back(store.as_ref(), &key, rating, checked_at).await;
                }
                Err(err) => {
                    tracing::warn!(
                        first_name = key.first_name(),
                        last_name = key.last_name(),
                        kind = err.kind(),
                        source = source.name(),
                        "live fetch failed, cache left as is: {}",
                        err
                    );
                    let _ = tx.send(Err(err));
                }
            }
        });
        (handle, rx)
    }
}

pub async fn receive_fetch(rx: oneshot::Receiver<Result<f64>>) -> Result<f64> {
    match rx.await {
        Ok(res) => res,
        Err(_) => Err(RatingError::FetchTransport(
            "fetch task ended without a result".to_string(),
        )),
    }
}

async fn write_back(store: &dyn RatingStore, key: &EntityKey, rating: f64, checked_at: DateTime<Utc>) {
    match store.upsert(key, rating, checked_at).await {
        Ok(()) => {
            tracing::info!(
                first_name = key.first_name(),
                last_name = key.last_name(),
                rating,
                store = store.name(),
                "cache reconciled"
            );
        }
        Err(err) => {
            tracing::warn!(
                first_name = key.first_name(),
                last_name = key.last_name(),
                kind = err.kind(),
                store = store.name(),
                "cache write-back failed: {}",
                err
            );
        }
    }
}
