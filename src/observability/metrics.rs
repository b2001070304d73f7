//! Metrics catalog for catalog updates
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed with [`init`].

use std::fmt;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Enum representing all metric names used in the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    CatalogFetchSuccess,
    CatalogFetchError,
    CatalogFetchDuration,
    CatalogRecordsReceived,
    CatalogServersAccepted,
    CatalogServersSkipped,
    CatalogBatchesRejected,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::CatalogFetchSuccess => "vpn_catalog_fetch_success_total",
            MetricName::CatalogFetchError => "vpn_catalog_fetch_error_total",
            MetricName::CatalogFetchDuration => "vpn_catalog_fetch_duration_seconds",
            MetricName::CatalogRecordsReceived => "vpn_catalog_records_received_total",
            MetricName::CatalogServersAccepted => "vpn_catalog_servers_accepted_total",
            MetricName::CatalogServersSkipped => "vpn_catalog_servers_skipped_total",
            MetricName::CatalogBatchesRejected => "vpn_catalog_batches_rejected_total",
        }
    }

    /// All metric names, in declaration order
    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            CatalogFetchSuccess,
            CatalogFetchError,
            CatalogFetchDuration,
            CatalogRecordsReceived,
            CatalogServersAccepted,
            CatalogServersSkipped,
            CatalogBatchesRejected,
        ]
        .into_iter()
    }

    /// Returns (phase, description, unit)
    pub fn metadata(&self) -> (&'static str, &'static str, Option<&'static str>) {
        match self {
            MetricName::CatalogFetchSuccess => ("fetch", "Successful catalog fetches", None),
            MetricName::CatalogFetchError => ("fetch", "Failed catalog fetches", None),
            MetricName::CatalogFetchDuration => ("fetch", "Catalog fetch duration", Some("s")),
            MetricName::CatalogRecordsReceived => ("fetch", "Raw server records received", None),
            MetricName::CatalogServersAccepted => ("normalize", "Servers accepted after validation", None),
            MetricName::CatalogServersSkipped => ("normalize", "Servers skipped for lacking TCP and UDP", None),
            MetricName::CatalogBatchesRejected => ("normalize", "Catalog updates rejected, by error kind", None),
        }
    }

    /// Unit from [`MetricName::metadata`] as understood by the exporter
    pub fn unit(&self) -> Option<::metrics::Unit> {
        match self.metadata().2 {
            Some("s") => Some(::metrics::Unit::Seconds),
            Some("bytes") => Some(::metrics::Unit::Bytes),
            _ => None,
        }
    }
}

/// Install the Prometheus recorder and return its render handle
pub fn init() -> Result<PrometheusHandle, Box<dyn std::error::Error + Send + Sync>> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;

    for name in MetricName::all_metrics() {
        let (_, description, _) = name.metadata();
        match name.unit() {
            Some(unit) => ::metrics::describe_histogram!(name.as_str(), unit, description),
            None => ::metrics::describe_counter!(name.as_str(), description),
        }
    }

    info!("Metrics system initialized");
    Ok(handle)
}

// ============================================================================
// Catalog Metrics
// ============================================================================

pub mod catalog {
    use super::MetricName;
    use crate::error::ErrorKind;

    pub fn fetch_success() {
        ::metrics::counter!(MetricName::CatalogFetchSuccess.as_str()).increment(1);
    }

    pub fn fetch_error() {
        ::metrics::counter!(MetricName::CatalogFetchError.as_str()).increment(1);
    }

    pub fn fetch_duration(secs: f64) {
        ::metrics::histogram!(MetricName::CatalogFetchDuration.as_str()).record(secs);
    }

    pub fn records_received(count: usize) {
        ::metrics::counter!(MetricName::CatalogRecordsReceived.as_str()).increment(count as u64);
    }

    pub fn servers_accepted(count: usize) {
        ::metrics::counter!(MetricName::CatalogServersAccepted.as_str()).increment(count as u64);
    }

    pub fn server_skipped() {
        ::metrics::counter!(MetricName::CatalogServersSkipped.as_str()).increment(1);
    }

    pub fn batch_rejected(kind: ErrorKind) {
        ::metrics::counter!(MetricName::CatalogBatchesRejected.as_str(), "kind" => kind.as_str())
            .increment(1);
    }
}
