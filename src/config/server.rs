//! HTTP listener settings.
//!
//! Every field has a default, so `LIVECAST__SERVER__*` variables only need to
//! name what differs from a local development run.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info,livecast=debug,tower_http=info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longest accepted timeout for the operational routes.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where and how the broadcaster listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, as an IP literal.
    pub host: String,

    pub port: u16,

    /// Deployment stage; production switches logs to JSON.
    pub environment: Environment,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Timeout for `/health`, `/connections` and `/infos`. `/sse` is exempt.
    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins. Unset allows any origin.
    pub cors_origins: Option<String>,
}

/// Deployment stage.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::default(),
            log_level: DEFAULT_LOG_FILTER.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// Address for the TCP listener.
    ///
    /// Host names are rejected; only IP literals bind without a resolver.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress(self.host.clone()))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured origins with blanks and stray commas dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces_port_8080() {
        let config = ServerConfig::default();

        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.cors_origins_list().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loopback_bind_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..ServerConfig::default()
        };

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn host_name_is_not_a_bind_address() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..ServerConfig::default()
        };

        assert!(matches!(
            config.socket_addr(),
            Err(ValidationError::InvalidBindAddress(host)) if host == "localhost"
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_stage_is_detected() {
        let mut config = ServerConfig::default();
        assert!(!config.is_production());

        config.environment = Environment::Staging;
        assert!(!config.is_production());

        config.environment = Environment::Production;
        assert!(config.is_production());
    }

    #[test]
    fn origin_list_skips_blank_entries() {
        let config = ServerConfig {
            cors_origins: Some(" https://a.test ,, https://b.test,".to_string()),
            ..ServerConfig::default()
        };

        assert_eq!(
            config.cors_origins_list(),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };

        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn request_timeout_must_be_between_one_and_max() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..ServerConfig::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }

        let config = ServerConfig {
            request_timeout_secs: MAX_REQUEST_TIMEOUT_SECS,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
