//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LIVECAST` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a runnable server.
//!
//! # Example
//!
//! ```no_run
//! use livecast::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Broadcasting every {:?}", config.broadcast.period());
//! ```

mod broadcast;
mod error;
mod server;

pub use broadcast::BroadcastConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Broadcast scheduler and stream configuration
    #[serde(default)]
    pub broadcast: BroadcastConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LIVECAST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LIVECAST__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LIVECAST__BROADCAST__PERIOD_SECS=1` -> `broadcast.period_secs = 1`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LIVECAST")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.broadcast.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("LIVECAST__SERVER__PORT");
        env::remove_var("LIVECAST__SERVER__ENVIRONMENT");
        env::remove_var("LIVECAST__BROADCAST__PERIOD_SECS");
        env::remove_var("LIVECAST__BROADCAST__LIFETIME_SECS");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.broadcast.period(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LIVECAST__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LIVECAST__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_custom_broadcast_settings() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LIVECAST__BROADCAST__PERIOD_SECS", "1");
        env::set_var("LIVECAST__BROADCAST__LIFETIME_SECS", "60");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.broadcast.period(), Duration::from_secs(1));
        assert_eq!(config.broadcast.lifetime(), Some(Duration::from_secs(60)));
        assert!(config.validate().is_ok());
    }
}
