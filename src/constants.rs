/// Provider and default settings shared across the crate

// Provider identifiers
pub const NORDVPN_PROVIDER: &str = "nordvpn";
pub const NORDVPN_API_URL: &str = "https://nordvpn.com/api/server";

// Defaults used when neither config file nor environment set a value
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MIN_SERVERS: usize = 1000;
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_USER_AGENT: &str = concat!("vpn-catalog/", env!("CARGO_PKG_VERSION"));

/// Version of the serialized catalog snapshot format
pub const SNAPSHOT_VERSION: u16 = 1;

// Environment overrides
pub const ENV_API_URL: &str = "VPN_CATALOG_API_URL";
pub const ENV_TIMEOUT_SECONDS: &str = "VPN_CATALOG_TIMEOUT_SECONDS";
pub const ENV_MIN_SERVERS: &str = "VPN_CATALOG_MIN_SERVERS";
pub const ENV_LOG_DIR: &str = "VPN_CATALOG_LOG_DIR";
