use crate::error::{RatingError, Result};
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Identity of a rated entity. Names are opaque, compared exactly and only required to be
/// non-empty; whitespace is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    first_name: String,
    last_name: String,
}

impl EntityKey {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Result<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        if first_name.is_empty() {
            return Err(RatingError::InvalidKey("firstName must not be empty"));
        }
        if last_name.is_empty() {
            return Err(RatingError::InvalidKey("lastName must not be empty"));
        }
        Ok(Self {
            first_name,
            last_name,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: EntityKey,
    pub rating: f64,
    pub last_checked: DateTime<Utc>,
}

impl CacheEntry {
    /// An entry exactly `ttl` old is already stale. A ttl reaching past the representable
    /// range never expires.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.last_checked
            .checked_add_signed(ttl)
            .map_or(true, |expires_at| expires_at > now)
    }
}
