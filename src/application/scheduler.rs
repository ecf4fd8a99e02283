//! BroadcastScheduler - Periodic fan-out of fresh values to every session.
//!
//! On every tick the scheduler:
//! 1. Takes a snapshot of the registry
//! 2. Computes `seed + jitter` for each session in the snapshot
//! 3. Enqueues all values concurrently into the session outboxes
//! 4. Waits for every enqueue to finish before the next tick may start
//!
//! Each enqueue is bounded by `delivery_timeout`, so a stalled subscriber
//! costs one skipped value per tick instead of stalling every tick. Skips are
//! logged but never deregister a session; that stays the dispatcher's job.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `period` | 10s | Time between ticks |
//! | `delivery_timeout` | 1s | Max wait for room in one outbox |
//! | `lifetime` | none | Stop after this long |
//!
//! ## Shutdown
//!
//! The loop exits when the shutdown signal fires or the lifetime elapses.
//! A tick in progress at that moment is dropped; its pending enqueues are
//! abandoned and no further values are delivered.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::BroadcastConfig;
use crate::domain::broadcast::compute_value;
use crate::domain::session::{Delivery, SessionRegistry};
use crate::ports::JitterSource;

use super::shutdown::shutdown_requested;

/// Configuration for the BroadcastScheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between ticks.
    pub period: Duration,

    /// Upper bound for a single enqueue.
    pub delivery_timeout: Duration,

    /// Stop the loop after this long, if set.
    pub lifetime: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(10),
            delivery_timeout: Duration::from_secs(1),
            lifetime: None,
        }
    }
}

impl SchedulerConfig {
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }
}

impl From<&BroadcastConfig> for SchedulerConfig {
    fn from(config: &BroadcastConfig) -> Self {
        Self {
            period: config.period(),
            delivery_timeout: config.delivery_timeout(),
            lifetime: config.lifetime(),
        }
    }
}

/// Outcome counts for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Values queued for their dispatcher.
    pub delivered: usize,
    /// Values skipped because the outbox stayed full.
    pub timed_out: usize,
    /// Values skipped because the dispatcher was already gone.
    pub closed: usize,
}

impl TickReport {
    /// Number of sessions in the tick's snapshot.
    pub fn attempted(&self) -> usize {
        self.delivered + self.timed_out + self.closed
    }
}

/// Why the scheduler loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    LifetimeElapsed,
}

/// Background service that broadcasts one value per session per tick.
pub struct BroadcastScheduler {
    registry: Arc<SessionRegistry>,
    jitter: Arc<dyn JitterSource>,
    config: SchedulerConfig,
}

impl BroadcastScheduler {
    /// Create a scheduler with default configuration.
    pub fn new(registry: Arc<SessionRegistry>, jitter: Arc<dyn JitterSource>) -> Self {
        Self::with_config(registry, jitter, SchedulerConfig::default())
    }

    /// Create a scheduler with custom configuration.
    pub fn with_config(
        registry: Arc<SessionRegistry>,
        jitter: Arc<dyn JitterSource>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            registry,
            jitter,
            config,
        }
    }

    /// Run the tick loop until shutdown or until the lifetime elapses.
    ///
    /// The first tick fires one `period` after the call.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> StopReason {
        let period = self.config.period;
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let deadline = self.config.lifetime.map(|lifetime| Instant::now() + lifetime);
        let expiry = async move {
            match deadline {
                Some(deadline) => time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(expiry);

        tracing::info!(
            period_ms = period.as_millis() as u64,
            lifetime_ms = self.config.lifetime.map(|l| l.as_millis() as u64),
            "Broadcast scheduler started"
        );

        let reason = loop {
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break StopReason::Shutdown,
                _ = &mut expiry => break StopReason::LifetimeElapsed,
                _ = interval.tick() => {
                    tokio::select! {
                        report = self.tick() => {
                            tracing::trace!(
                                delivered = report.delivered,
                                timed_out = report.timed_out,
                                closed = report.closed,
                                "Broadcast tick finished"
                            );
                        }
                        _ = shutdown_requested(&mut shutdown) => break StopReason::Shutdown,
                        _ = &mut expiry => break StopReason::LifetimeElapsed,
                    }
                }
            }
        };

        tracing::info!(reason = ?reason, "Broadcast scheduler stopped");
        reason
    }

    /// Run exactly one tick against the current registry snapshot.
    pub async fn tick(&self) -> TickReport {
        let members = self.registry.snapshot();
        let timeout = self.config.delivery_timeout;

        let deliveries = members.iter().map(|handle| {
            let value = compute_value(handle.seed(), self.jitter.draw());
            async move { (handle, handle.deliver(value, timeout).await) }
        });

        let mut report = TickReport::default();
        for (handle, outcome) in join_all(deliveries).await {
            match outcome {
                Delivery::Delivered => report.delivered += 1,
                Delivery::TimedOut => {
                    tracing::warn!(
                        session_id = %handle.id(),
                        timeout_ms = timeout.as_millis() as u64,
                        "Outbox full, skipping value"
                    );
                    report.timed_out += 1;
                }
                Delivery::Closed => {
                    tracing::debug!(
                        session_id = %handle.id(),
                        "Outbox closed, skipping value"
                    );
                    report.closed += 1;
                }
            }
        }

        report
    }
}
