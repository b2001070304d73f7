use std::net::IpAddr;

use crate::error::{CatalogError, Result};

/// Parse `address` as an IPv4 literal for the server named `server`.
///
/// IPv6 literals are rejected with [`CatalogError::NotIpv4`]. This includes
/// IPv4-mapped forms such as `::ffff:1.2.3.4`, which are deliberately not
/// unwrapped to their IPv4 address: the catalog is expected to carry plain
/// dotted-decimal IPv4.
pub fn parse_ipv4(server: &str, address: &str) -> Result<IpAddr> {
    let ip: IpAddr = address.parse().map_err(|_| CatalogError::ParseIp {
        server: server.to_string(),
        address: address.to_string(),
    })?;

    match ip {
        IpAddr::V4(_) => Ok(ip),
        IpAddr::V6(_) => Err(CatalogError::NotIpv4 {
            server: server.to_string(),
            address: address.to_string(),
        }),
    }
}
