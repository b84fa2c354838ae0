use crate::domain::entity::EntityKey;
use crate::error::{RatingError, Result};
use crate::sources::{parse_rating, RatingSource};

pub struct ScraperSource {
    pub base_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl ScraperSource {
    pub fn new(host: &str, timeout_ms: u64) -> Self {
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", host.trim_end_matches('/'))
        };
        Self {
            base_url,
            timeout_ms,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl RatingSource for ScraperSource {
    fn name(&self) -> &'static str {
        "scraper"
    }

    async fn fetch(&self, key: &EntityKey) -> Result<f64> {
        let url = format!("{}/rate", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[("firstName", key.first_name()), ("lastName", key.last_name())])
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RatingError::FetchTransport(format!("timed out after {}ms", self.timeout_ms))
                } else {
                    RatingError::FetchTransport(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RatingError::FetchStatus(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RatingError::FetchTransport(e.to_string()))?;
        parse_rating(&body)
    }
}
