//! Broadcast scheduling and stream configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tick, keepalive and outbox settings shared by the scheduler and dispatchers.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    /// Seconds between broadcast ticks
    #[serde(default = "default_period")]
    pub period_secs: u64,

    /// Idle seconds before a keepalive frame is written
    #[serde(default = "default_keepalive")]
    pub keepalive_secs: u64,

    /// Capacity of each session's outbox
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,

    /// Upper bound for a single enqueue during fan-out, in milliseconds
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_ms: u64,

    /// Stop the scheduler after this many seconds. Absent means run until shutdown.
    pub lifetime_secs: Option<u64>,
}

impl BroadcastConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }

    pub fn lifetime(&self) -> Option<Duration> {
        self.lifetime_secs.map(Duration::from_secs)
    }

    /// Validate broadcast configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.period_secs == 0 {
            return Err(ValidationError::InvalidPeriod);
        }
        if self.keepalive_secs == 0 {
            return Err(ValidationError::InvalidKeepalive);
        }
        if self.outbox_capacity == 0 {
            return Err(ValidationError::InvalidOutboxCapacity);
        }
        if self.delivery_timeout_ms == 0 || self.delivery_timeout() > self.period() {
            return Err(ValidationError::InvalidDeliveryTimeout);
        }
        if self.lifetime_secs == Some(0) {
            return Err(ValidationError::InvalidLifetime);
        }
        Ok(())
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            period_secs: default_period(),
            keepalive_secs: default_keepalive(),
            outbox_capacity: default_outbox_capacity(),
            delivery_timeout_ms: default_delivery_timeout(),
            lifetime_secs: None,
        }
    }
}

fn default_period() -> u64 {
    10
}

fn default_keepalive() -> u64 {
    15
}

fn default_outbox_capacity() -> usize {
    16
}

fn default_delivery_timeout() -> u64 {
    1_000
}
