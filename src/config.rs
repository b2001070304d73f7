use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    DEFAULT_LOG_DIR, DEFAULT_MIN_SERVERS, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
    ENV_API_URL, ENV_LOG_DIR, ENV_MIN_SERVERS, ENV_TIMEOUT_SECONDS, NORDVPN_API_URL,
};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub min_servers: usize,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: NORDVPN_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            min_servers: DEFAULT_MIN_SERVERS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, then apply environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading overrides from `lookup` instead of the
    /// process environment.
    pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_file(path)?;
        config.apply_env(lookup)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Override values from `lookup`, keyed by environment variable name.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.catalog.api_url = url;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECONDS) {
            self.catalog.timeout_seconds = parse_env(ENV_TIMEOUT_SECONDS, value)?;
        }
        if let Some(value) = lookup(ENV_MIN_SERVERS) {
            self.catalog.min_servers = parse_env(ENV_MIN_SERVERS, value)?;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.logging.directory = dir;
        }
        Ok(())
    }

    /// Apply command-line values, which take precedence over file and environment.
    pub fn apply_overrides(&mut self, min_servers: Option<usize>, timeout_seconds: Option<u64>) {
        if let Some(min_servers) = min_servers {
            self.catalog.min_servers = min_servers;
        }
        if let Some(timeout_seconds) = timeout_seconds {
            self.catalog.timeout_seconds = timeout_seconds;
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value,
        })
}
