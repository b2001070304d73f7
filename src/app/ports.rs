use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::types::RawServerRecord;

/// Source of raw catalog records (the fetch stage).
///
/// Implementations must return [`FetchError::Cancelled`] promptly once
/// `cancel` fires and must not return partial results.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Provider identifier, used for logging and metrics labels
    fn provider(&self) -> &'static str;

    async fn fetch(&self, cancel: &CancellationToken) -> Result<Vec<RawServerRecord>, FetchError>;
}

/// Sink for human-readable warnings about skipped records.
pub trait Warner: Send + Sync {
    fn warn(&self, message: &str);
}

// Transport port used by provider sources
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult, FetchError>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub reason: String,
    pub bytes: Vec<u8>,
}
