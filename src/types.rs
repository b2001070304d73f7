use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Raw server record as returned by the provider's catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawServerRecord {
    pub country: String,
    pub domain: String,
    pub ip_address: String,
    pub name: String,
    #[serde(default)]
    pub features: Features,
}

/// Transport capabilities advertised for a raw server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    #[serde(rename = "openvpn_tcp", default)]
    pub tcp: bool,
    #[serde(rename = "openvpn_udp", default)]
    pub udp: bool,
}

impl Features {
    pub fn any(&self) -> bool {
        self.tcp || self.udp
    }
}

/// VPN technology a descriptor is usable with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VpnType {
    OpenVpn,
}

impl std::fmt::Display for VpnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VpnType::OpenVpn => write!(f, "openvpn"),
        }
    }
}

/// Validated, normalized representation of one connectable server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub vpn: VpnType,
    pub region: String,
    pub hostname: String,
    /// Number of the server within its region, decoded from its name
    pub number: u16,
    pub ips: Vec<IpAddr>,
    pub tcp: bool,
    pub udp: bool,
}

/// Serialized catalog document written by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub version: u16,
    /// Unix timestamp in seconds of the update
    pub timestamp: i64,
    pub servers: Vec<ServerDescriptor>,
}

impl CatalogSnapshot {
    pub fn new(servers: Vec<ServerDescriptor>) -> Self {
        Self {
            version: crate::constants::SNAPSHOT_VERSION,
            timestamp: chrono::Utc::now().timestamp(),
            servers,
        }
    }
}
