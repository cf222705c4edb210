use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::cache::CacheConfig;
use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::rate_limit::RateLimitConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const MIN_BUFFER_SIZE: usize = 512;
const MAX_BUFFER_SIZE: usize = 65_535;

/// Main configuration structure for dohgate
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// UDP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// DoH resolver pool
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Per-client admission control
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Response cache maintenance
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Audit log store
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dohgate.toml in current directory
    /// 3. /etc/dohgate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dohgate.toml").exists() {
            Self::from_file("dohgate.toml")?
        } else if std::path::Path::new("/etc/dohgate/config.toml").exists() {
            Self::from_file("/etc/dohgate/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.server.buffer_size) {
            return Err(ConfigError::Validation(format!(
                "buffer_size must be between {} and {}",
                MIN_BUFFER_SIZE, MAX_BUFFER_SIZE
            )));
        }

        if self.server.max_in_flight == 0 {
            return Err(ConfigError::Validation(
                "max_in_flight must be greater than 0".to_string(),
            ));
        }

        if self.upstream.resolvers.is_empty() {
            return Err(ConfigError::NoResolvers);
        }

        let mut seen = HashSet::new();
        for resolver in &self.upstream.resolvers {
            if resolver.id.trim().is_empty() {
                return Err(ConfigError::InvalidResolver {
                    id: resolver.id.clone(),
                    reason: "id cannot be empty".to_string(),
                });
            }
            if !resolver.url.starts_with("https://") {
                return Err(ConfigError::InvalidResolver {
                    id: resolver.id.clone(),
                    reason: "must use an https:// URL".to_string(),
                });
            }
            if !seen.insert(resolver.id.as_str()) {
                return Err(ConfigError::DuplicateResolver(resolver.id.clone()));
            }
        }

        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.max_requests must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit.window_seconds == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.window_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
