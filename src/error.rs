use thiserror::Error;

/// Failures of the upstream catalog fetch. Never retried here.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status code not OK: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog fetch cancelled")]
    Cancelled,
}

/// Failures decoding the numeric identifier out of a server name.
#[derive(Error, Debug)]
pub enum ServerNameError {
    #[error("no ID in server name: {name}")]
    NoId { name: String },

    #[error("invalid ID in server name: {name}")]
    InvalidId { name: String },
}

/// Fatal outcomes of a catalog update. Any of these discards the whole batch.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("cannot parse IP address {address:?} for server {server}")]
    ParseIp { server: String, address: String },

    #[error("IP address {address} is not IPv4 for server {server}")]
    NotIpv4 { server: String, address: String },

    #[error("cannot decode server identifier: {0}")]
    ServerName(#[from] ServerNameError),

    #[error("not enough servers found: {found} and expected at least {required}")]
    NotEnoughServers { found: usize, required: usize },
}

/// Payload-free category of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FetchFailed,
    ParseIp,
    NotIpv4,
    IdentifierDecodeFailed,
    NotEnoughServers,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FetchFailed => "fetch_failed",
            ErrorKind::ParseIp => "parse_ip",
            ErrorKind::NotIpv4 => "not_ipv4",
            ErrorKind::IdentifierDecodeFailed => "identifier_decode_failed",
            ErrorKind::NotEnoughServers => "not_enough_servers",
        }
    }
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Fetch(_) => ErrorKind::FetchFailed,
            CatalogError::ParseIp { .. } => ErrorKind::ParseIp,
            CatalogError::NotIpv4 { .. } => ErrorKind::NotIpv4,
            CatalogError::ServerName(_) => ErrorKind::IdentifierDecodeFailed,
            CatalogError::NotEnoughServers { .. } => ErrorKind::NotEnoughServers,
        }
    }
}

/// Failures loading configuration from file or environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value {value:?} for environment variable {key}")]
    InvalidEnv { key: String, value: String },
}

/// Failures setting up log output.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to create log directory '{path}': {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = CatalogError::NotEnoughServers { found: 3, required: 10 };
        assert_eq!(err.kind(), ErrorKind::NotEnoughServers);
        assert_eq!(
            err.to_string(),
            "not enough servers found: 3 and expected at least 10"
        );

        let err = CatalogError::from(FetchError::Cancelled);
        assert_eq!(err.kind(), ErrorKind::FetchFailed);
        assert_eq!(err.to_string(), "catalog fetch cancelled");
    }

    #[test]
    fn test_parse_ip_message_names_server() {
        let err = CatalogError::ParseIp {
            server: "Germany #12".to_string(),
            address: "not-an-ip".to_string(),
        };
        assert!(err.to_string().contains("Germany #12"));
        assert_eq!(err.kind().as_str(), "parse_ip");
    }
}
