//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Broadcast period must be at least one second")]
    InvalidPeriod,

    #[error("Keepalive interval must be at least one second")]
    InvalidKeepalive,

    #[error("Outbox capacity must be greater than zero")]
    InvalidOutboxCapacity,

    #[error("Delivery timeout must be non-zero and no longer than the broadcast period")]
    InvalidDeliveryTimeout,

    #[error("Scheduler lifetime must be greater than zero when set")]
    InvalidLifetime,
}
