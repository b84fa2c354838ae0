pub mod config;
pub mod domain {
    pub mod entity;
    pub mod rating;
}
pub mod error;
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod ratings;
    }
    pub mod router;
}
pub mod service {
    pub mod rating_resolver;
    pub mod reconciler;
}
pub mod sources;
pub mod store;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resolver: service::rating_resolver::RatingResolver,
    pub store: Arc<dyn store::RatingStore>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn store::RatingStore>,
        source: Arc<dyn sources::RatingSource>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            resolver: service::rating_resolver::RatingResolver::new(store.clone(), source, ttl),
            store,
        }
    }
}
