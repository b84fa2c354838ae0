use crate::domain::entity::EntityKey;
use crate::error::{RatingError, Result};

pub mod mock;
pub mod scraper;

#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, key: &EntityKey) -> Result<f64>;
}

/// Parses a plain-text decimal body, tolerating surrounding whitespace.
pub fn parse_rating(body: &str) -> Result<f64> {
    let trimmed = body.trim();
    let rating = trimmed.parse::<f64>().map_err(|source| RatingError::Parse {
        body: trimmed.chars().take(64).collect(),
        source,
    })?;
    if !rating.is_finite() {
        return Err(RatingError::NonFinite(trimmed.to_string()));
    }
    Ok(rating)
}
