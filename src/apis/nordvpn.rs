use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::app::ports::{CatalogSource, HttpClientPort};
use crate::constants::{NORDVPN_API_URL, NORDVPN_PROVIDER};
use crate::error::FetchError;
use crate::types::RawServerRecord;

/// NordVPN server catalog fetched from its public JSON endpoint
pub struct NordVpnApi {
    http: Box<dyn HttpClientPort>,
    url: String,
}

impl NordVpnApi {
    pub fn new(http: Box<dyn HttpClientPort>) -> Self {
        Self::with_url(http, NORDVPN_API_URL)
    }

    pub fn with_url(http: Box<dyn HttpClientPort>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    fn decode(bytes: &[u8]) -> Result<Vec<RawServerRecord>, FetchError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[async_trait]
impl CatalogSource for NordVpnApi {
    fn provider(&self) -> &'static str {
        NORDVPN_PROVIDER
    }

    #[instrument(skip(self, cancel), fields(url = %self.url))]
    async fn fetch(&self, cancel: &CancellationToken) -> Result<Vec<RawServerRecord>, FetchError> {
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(FetchError::Cancelled),
            response = self.http.get(&self.url) => response?,
        };

        if response.status != 200 {
            return Err(FetchError::Status {
                status: response.status,
                reason: response.reason,
            });
        }
        debug!("Received {} bytes of catalog data", response.bytes.len());

        let records = Self::decode(&response.bytes)?;
        info!("Successfully fetched {} servers from NordVPN", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_non_array() {
        let err = NordVpnApi::decode(br#"{"servers": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(NordVpnApi::decode(b"[]").unwrap().is_empty());
    }
}
