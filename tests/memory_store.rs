use chrono::{Duration, Utc};
use ratings_service::domain::entity::EntityKey;
use ratings_service::store::memory::InMemoryRatingStore;
use ratings_service::store::RatingStore;

fn key() -> EntityKey {
    EntityKey::new("Grace", "Hopper").unwrap()
}

#[tokio::test]
async fn later_upsert_overwrites_rating_and_timestamp() {
    let store = InMemoryRatingStore::new();
    let t1 = Utc::now() - Duration::hours(1);
    let t2 = Utc::now();

    store.upsert(&key(), 4.0, t1).await.unwrap();
    store.upsert(&key(), 4.9, t2).await.unwrap();

    assert_eq!(store.len().await, 1);
    let stored = store.get(&key()).await.unwrap().unwrap();
    assert_eq!(stored.rating, 4.9);
    assert_eq!(stored.last_checked, t2);
}

#[tokio::test]
async fn upsert_with_same_timestamp_overwrites() {
    let store = InMemoryRatingStore::new();
    let t = Utc::now();

    store.upsert(&key(), 4.0, t).await.unwrap();
    store.upsert(&key(), 4.2, t).await.unwrap();

    assert_eq!(store.len().await, 1);
    let stored = store.get(&key()).await.unwrap().unwrap();
    assert_eq!(stored.rating, 4.2);
    assert_eq!(stored.last_checked, t);
}

#[tokio::test]
async fn older_upsert_does_not_move_timestamp_back() {
    let store = InMemoryRatingStore::new();
    let newer = Utc::now();
    let older = newer - Duration::minutes(5);

    store.upsert(&key(), 3.0, newer).await.unwrap();
    store.upsert(&key(), 1.0, older).await.unwrap();

    let stored = store.get(&key()).await.unwrap().unwrap();
    assert_eq!(stored.rating, 3.0);
    assert_eq!(stored.last_checked, newer);
}

#[tokio::test]
async fn concurrent_upserts_leave_one_entry_with_latest_time() {
    let store = InMemoryRatingStore::new();
    let base = Utc::now();

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .upsert(&key(), i as f64, base + Duration::seconds(i))
                .await
                .unwrap();
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    assert_eq!(store.len().await, 1);
    let stored = store.get(&key()).await.unwrap().unwrap();
    assert_eq!(stored.rating, 19.0);
    assert_eq!(store.write_count(), 20);
}

#[tokio::test]
async fn simulated_failures_surface_as_storage_errors() {
    let store = InMemoryRatingStore::new();
    store.set_fail_reads(true);
    store.set_fail_writes(true);

    let read = store.get(&key()).await.unwrap_err();
    let write = store.upsert(&key(), 1.0, Utc::now()).await.unwrap_err();

    assert_eq!(read.kind(), "storage_read");
    assert_eq!(write.kind(), "storage_write");
    assert!(store.ping().await.is_err());
    assert!(store.is_empty().await);
}
