use chrono::{Duration, Utc};
use ratings_service::domain::entity::{CacheEntry, EntityKey};
use ratings_service::error::RatingError;

fn entry(age: Duration) -> (CacheEntry, chrono::DateTime<Utc>) {
    let now = Utc::now();
    let entry = CacheEntry {
        key: EntityKey::new("Ada", "Lovelace").unwrap(),
        rating: 4.5,
        last_checked: now - age,
    };
    (entry, now)
}

#[test]
fn entry_younger_than_ttl_is_fresh() {
    let (e, now) = entry(Duration::hours(2));
    assert!(e.is_fresh(Duration::hours(24), now));
}

#[test]
fn entry_older_than_ttl_is_stale() {
    let (e, now) = entry(Duration::hours(30));
    assert!(!e.is_fresh(Duration::hours(24), now));
}

#[test]
fn entry_exactly_ttl_old_is_stale() {
    let (e, now) = entry(Duration::days(5));
    assert!(!e.is_fresh(Duration::days(5), now));
    assert!(e.is_fresh(Duration::days(5) + Duration::nanoseconds(1), now));
}

#[test]
fn zero_ttl_never_serves_cache() {
    let (e, now) = entry(Duration::zero());
    assert!(!e.is_fresh(Duration::zero(), now));
}

#[test]
fn empty_names_are_rejected() {
    assert!(matches!(EntityKey::new("", "Hopper"), Err(RatingError::InvalidKey(_))));
    assert!(matches!(EntityKey::new("Grace", ""), Err(RatingError::InvalidKey(_))));
}

#[test]
fn whitespace_names_are_kept_verbatim() {
    let key = EntityKey::new(" ", "Hopper").unwrap();
    assert_eq!(key.first_name(), " ");
    assert_ne!(key, EntityKey::new("  ", "Hopper").unwrap());
}

#[test]
fn ttl_past_calendar_range_never_expires() {
    let (e, now) = entry(Duration::hours(2));
    assert!(e.is_fresh(Duration::MAX, now));
    assert!(e.is_fresh(Duration::try_seconds(100_000_000_000_000).unwrap(), now));
}

#[test]
fn names_compare_exactly() {
    let a = EntityKey::new("Ada", "Lovelace").unwrap();
    let b = EntityKey::new("ada", "Lovelace").unwrap();
    let c = EntityKey::new(" Ada", "Lovelace").unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(c.first_name(), " Ada");
    assert_eq!(a, EntityKey::new("Ada", "Lovelace").unwrap());
}
