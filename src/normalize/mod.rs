//! Pure stages of a catalog update: filter & validate, threshold check, sort.
//!
//! Nothing here performs I/O. Skipped records are reported through the
//! injected [`Warner`]; every other problem aborts the whole batch.

pub mod ip;
pub mod server_name;
pub mod sort;

pub use ip::parse_ipv4;
pub use server_name::parse_server_name;
pub use sort::{compare_servers, sort_servers};

use tracing::debug;

use crate::app::ports::Warner;
use crate::error::{CatalogError, Result};
use crate::types::{RawServerRecord, ServerDescriptor, VpnType};

/// Convert raw records into descriptors, in input order.
///
/// Records advertising neither TCP nor UDP are skipped with one warning each.
/// A malformed IP address or server name fails the entire batch.
pub fn normalize_records(
    records: Vec<RawServerRecord>,
    warner: &dyn Warner,
) -> Result<Vec<ServerDescriptor>> {
    let mut servers = Vec::with_capacity(records.len());

    for record in records {
        if !record.features.any() {
            warner.warn(&format!(
                "server does not support TCP and UDP for openvpn: {}",
                record.name
            ));
            crate::observability::metrics::catalog::server_skipped();
            continue;
        }

        let ip = parse_ipv4(&record.name, &record.ip_address)?;
        let number = parse_server_name(&record.name)?;

        servers.push(ServerDescriptor {
            vpn: VpnType::OpenVpn,
            region: record.country,
            hostname: record.domain,
            number,
            ips: vec![ip],
            tcp: record.features.tcp,
            udp: record.features.udp,
        });
    }

    debug!("Normalized {} servers", servers.len());
    Ok(servers)
}

/// Fail with [`CatalogError::NotEnoughServers`] when `found < required`.
pub fn check_minimum(found: usize, required: usize) -> Result<()> {
    if found < required {
        return Err(CatalogError::NotEnoughServers { found, required });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::infra::warner::CollectingWarner;
    use crate::types::Features;

    fn record(country: &str, domain: &str, ip: &str, name: &str, tcp: bool, udp: bool) -> RawServerRecord {
        RawServerRecord {
            country: country.to_string(),
            domain: domain.to_string(),
            ip_address: ip.to_string(),
            name: name.to_string(),
            features: Features { tcp, udp },
        }
    }

    #[test]
    fn test_all_valid_records_are_kept() {
        let warner = CollectingWarner::new();
        let records = vec![
            record("Albania", "al9.nordvpn.com", "31.171.154.115", "Albania #9", true, false),
            record("Albania", "al10.nordvpn.com", "31.171.154.116", "Albania #10", false, true),
            record("Belgium", "be1.nordvpn.com", "5.253.205.1", "Belgium #1", true, true),
        ];

        let servers = normalize_records(records, &warner).unwrap();

        assert_eq!(servers.len(), 3);
        assert!(warner.messages().is_empty());
        assert_eq!(servers[0].region, "Albania");
        assert_eq!(servers[0].hostname, "al9.nordvpn.com");
        assert_eq!(servers[0].number, 9);
        assert_eq!(servers[0].vpn, VpnType::OpenVpn);
        assert_eq!(servers[0].ips.len(), 1);
        assert!(servers[0].tcp && !servers[0].udp);
        assert!(!servers[1].tcp && servers[1].udp);
    }

    #[test]
    fn test_capability_less_record_is_skipped_with_one_warning() {
        let warner = CollectingWarner::new();
        let records = vec![
            record("Albania", "al9.nordvpn.com", "31.171.154.115", "Albania #9", false, false),
            record("Belgium", "be1.nordvpn.com", "5.253.205.1", "Belgium #1", true, false),
        ];

        let servers = normalize_records(records, &warner).unwrap();

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].hostname, "be1.nordvpn.com");
        let messages = warner.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Albania #9"));
    }

    #[test]
    fn test_skipped_record_is_not_validated() {
        let warner = CollectingWarner::new();
        let records = vec![record("Albania", "al.nordvpn.com", "bogus", "no number", false, false)];

        let servers = normalize_records(records, &warner).unwrap();
        assert!(servers.is_empty());
        assert_eq!(warner.messages().len(), 1);
    }

    #[test]
    fn test_bad_ip_fails_whole_batch() {
        let warner = CollectingWarner::new();
        let records = vec![
            record("Albania", "al9.nordvpn.com", "31.171.154.115", "Albania #9", true, true),
            record("Belgium", "be1.nordvpn.com", "5.253.205", "Belgium #1", true, true),
        ];

        let err = normalize_records(records, &warner).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseIp);
        assert!(err.to_string().contains("Belgium #1"));
    }

    #[test]
    fn test_bad_name_fails_whole_batch() {
        let warner = CollectingWarner::new();
        let records = vec![record("Albania", "al9.nordvpn.com", "31.171.154.115", "Albania", true, true)];

        let err = normalize_records(records, &warner).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentifierDecodeFailed);
    }

    #[test]
    fn test_check_minimum_boundaries() {
        assert!(check_minimum(5, 5).is_ok());
        assert!(check_minimum(6, 5).is_ok());
        assert!(check_minimum(0, 0).is_ok());

        match check_minimum(4, 5) {
            Err(CatalogError::NotEnoughServers { found, required }) => {
                assert_eq!(found, 4);
                assert_eq!(required, 5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
