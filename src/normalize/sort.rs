use std::cmp::Ordering;

use crate::types::ServerDescriptor;

/// Total order on descriptors: region, then hostname, then number.
pub fn compare_servers(a: &ServerDescriptor, b: &ServerDescriptor) -> Ordering {
    a.region
        .cmp(&b.region)
        .then_with(|| a.hostname.cmp(&b.hostname))
        .then_with(|| a.number.cmp(&b.number))
}

/// Sort in place. Stable, so equal keys keep their input order.
pub fn sort_servers(servers: &mut [ServerDescriptor]) {
    servers.sort_by(compare_servers);
}
