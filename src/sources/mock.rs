use crate::domain::entity::EntityKey;
use crate::error::{RatingError, Result};
use crate::sources::{parse_rating, RatingSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Fixed(f64),
    Delayed(f64, Duration),
    Unreachable,
    Body(String),
}

pub struct MockSource {
    pub behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RatingSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, _key: &EntityKey) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Fixed(rating) => Ok(*rating),
            MockBehavior::Delayed(rating, delay) => {
                tokio::time::sleep(*delay).await;
                Ok(*rating)
            }
            MockBehavior::Unreachable => {
                Err(RatingError::FetchTransport("mock source unreachable".to_string()))
            }
            MockBehavior::Body(body) => parse_rating(body),
        }
    }
}
