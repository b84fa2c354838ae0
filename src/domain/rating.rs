use crate::domain::entity::CacheEntry;
use crate::error::RatingError;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// Returned when the live lookup fails and no fresh cache entry exists.
pub const FALLBACK_RATING: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOrigin {
    Cache,
    Live,
    Fallback,
}

impl RatingOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingOrigin::Cache => "cache",
            RatingOrigin::Live => "live",
            RatingOrigin::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingResult {
    pub rating: f64,
    pub origin: RatingOrigin,
}

/// Outcome of one request: the answer plus the fetch task that reconciles the cache.
/// Dropping `write_back` detaches the task; it keeps running.
#[derive(Debug)]
pub struct Resolution {
    pub result: RatingResult,
    pub write_back: JoinHandle<()>,
}

#[derive(Debug)]
pub enum CacheOutcome {
    Fresh(CacheEntry),
    Stale(CacheEntry),
    Miss,
    Unavailable(RatingError),
}

impl CacheOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CacheOutcome::Fresh(_) => "fresh",
            CacheOutcome::Stale(_) => "stale",
            CacheOutcome::Miss => "miss",
            CacheOutcome::Unavailable(_) => "unavailable",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorPayload {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }
}
