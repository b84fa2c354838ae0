use std::num::ParseFloatError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, RatingError>;

#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("invalid entity key: {0}")]
    InvalidKey(&'static str),

    #[error("cache read failed: {0}")]
    StorageRead(#[source] BoxError),

    #[error("cache write failed: {0}")]
    StorageWrite(#[source] BoxError),

    #[error("rating source unreachable: {0}")]
    FetchTransport(String),

    #[error("rating source answered HTTP {0}")]
    FetchStatus(u16),

    #[error("rating source body {body:?} is not a decimal number")]
    Parse {
        body: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("rating source body {0:?} is not a finite number")]
    NonFinite(String),
}

impl RatingError {
    /// Stable label attached to every log line for this failure.
    pub fn kind(&self) -> &'static str {
        match self {
            RatingError::InvalidKey(_) => "invalid_key",
            RatingError::StorageRead(_) => "storage_read",
            RatingError::StorageWrite(_) => "storage_write",
            RatingError::FetchTransport(_) => "fetch_transport",
            RatingError::FetchStatus(_) => "fetch_status",
            RatingError::Parse { .. } | RatingError::NonFinite(_) => "parse",
        }
    }
}
