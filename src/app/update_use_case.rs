use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::app::ports::{CatalogSource, Warner};
use crate::error::Result;
use crate::normalize::{check_minimum, normalize_records, sort_servers};
use crate::observability::metrics::catalog;
use crate::types::ServerDescriptor;

/// Use case turning a provider's raw catalog into a sorted descriptor list.
///
/// Holds no state between calls; run independent instances when updating
/// several providers in parallel.
pub struct UpdateUseCase {
    source: Box<dyn CatalogSource>,
    warner: Box<dyn Warner>,
}

impl UpdateUseCase {
    pub fn new(source: Box<dyn CatalogSource>, warner: Box<dyn Warner>) -> Self {
        Self { source, warner }
    }

    /// Fetch, validate, threshold-check and sort the provider's servers.
    ///
    /// Returns no partial list on error.
    #[instrument(skip(self, cancel), fields(provider = self.source.provider()))]
    pub async fn get_servers(
        &self,
        cancel: &CancellationToken,
        min_servers: usize,
    ) -> Result<Vec<ServerDescriptor>> {
        let result = self.run(cancel, min_servers).await;
        if let Err(e) = &result {
            warn!("Catalog update failed: {}", e);
            catalog::batch_rejected(e.kind());
        }
        result
    }

    async fn run(
        &self,
        cancel: &CancellationToken,
        min_servers: usize,
    ) -> Result<Vec<ServerDescriptor>> {
        let started = Instant::now();
        let fetched = self.source.fetch(cancel).await;
        catalog::fetch_duration(started.elapsed().as_secs_f64());

        let records = match fetched {
            Ok(records) => {
                catalog::fetch_success();
                records
            }
            Err(e) => {
                catalog::fetch_error();
                return Err(e.into());
            }
        };
        catalog::records_received(records.len());
        let received = records.len();

        let mut servers = normalize_records(records, self.warner.as_ref())?;
        check_minimum(servers.len(), min_servers)?;
        sort_servers(&mut servers);

        catalog::servers_accepted(servers.len());
        info!(
            "Catalog update produced {} servers from {} records",
            servers.len(),
            received
        );
        Ok(servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, ErrorKind, FetchError};
    use crate::infra::warner::CollectingWarner;
    use crate::types::{Features, RawServerRecord};
    use async_trait::async_trait;

    struct StaticSource {
        result: fn() -> std::result::Result<Vec<RawServerRecord>, FetchError>,
    }

    #[async_trait]
    impl CatalogSource for StaticSource {
        fn provider(&self) -> &'static str {
            "static"
        }

        async fn fetch(
            &self,
            _cancel: &CancellationToken,
        ) -> std::result::Result<Vec<RawServerRecord>, FetchError> {
            (self.result)()
        }
    }

    fn two_records() -> std::result::Result<Vec<RawServerRecord>, FetchError> {
        Ok(vec![
            RawServerRecord {
                country: "Belgium".to_string(),
                domain: "be1.nordvpn.com".to_string(),
                ip_address: "5.253.205.1".to_string(),
                name: "Belgium #1".to_string(),
                features: Features { tcp: true, udp: true },
            },
            RawServerRecord {
                country: "Albania".to_string(),
                domain: "al9.nordvpn.com".to_string(),
                ip_address: "31.171.154.115".to_string(),
                name: "Albania #9".to_string(),
                features: Features { tcp: false, udp: true },
            },
        ])
    }

    #[tokio::test]
    async fn test_get_servers_sorts_output() {
        let use_case = UpdateUseCase::new(
            Box::new(StaticSource { result: two_records }),
            Box::new(CollectingWarner::new()),
        );

        let servers = use_case
            .get_servers(&CancellationToken::new(), 2)
            .await
            .unwrap();

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].region, "Albania");
        assert_eq!(servers[1].region, "Belgium");
    }

    #[tokio::test]
    async fn test_get_servers_enforces_minimum() {
        let use_case = UpdateUseCase::new(
            Box::new(StaticSource { result: two_records }),
            Box::new(CollectingWarner::new()),
        );

        let err = use_case
            .get_servers(&CancellationToken::new(), 3)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::NotEnoughServers { found: 2, required: 3 }
        ));
    }

    #[tokio::test]
    async fn test_fetch_error_is_propagated() {
        let use_case = UpdateUseCase::new(
            Box::new(StaticSource {
                result: || Err(FetchError::Cancelled),
            }),
            Box::new(CollectingWarner::new()),
        );

        let err = use_case
            .get_servers(&CancellationToken::new(), 0)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::FetchFailed);
        assert!(matches!(err, CatalogError::Fetch(FetchError::Cancelled)));
    }
}
