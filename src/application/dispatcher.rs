//! StreamDispatcher - Owns one subscriber connection from open to close.
//!
//! Lifecycle:
//! 1. **Registering** - open a session for the seed and add it to the registry
//! 2. **Streaming** - wait on the outbox, the keepalive timer, the transport's
//!    disconnect notification and the shutdown signal; whichever is ready
//!    first is handled, then the loop waits again
//! 3. **Draining** - deregister the session
//! 4. **Closed** - return the close reason to the connection handler
//!
//! Every exit from Streaming passes through Draining, so a session is never
//! left registered once its writer has given up.
//!
//! Encoding failures skip the event and keep the stream open. Write failures
//! end the stream. The disconnect notification is best-effort; a failed write
//! is the authoritative signal. A pending write still yields to disconnect and
//! shutdown, so a subscriber that stops reading cannot pin its session.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant};

use crate::config::BroadcastConfig;
use crate::domain::broadcast::OutboundEvent;
use crate::domain::foundation::SessionId;
use crate::domain::session::{Seed, Session, SessionRegistry};
use crate::ports::{EventEncoder, FrameSink, SinkError};

use super::shutdown::shutdown_requested;

/// Per-connection settings.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Idle time before a keepalive frame is written.
    pub keepalive: Duration,

    /// Capacity of the session outbox.
    pub outbox_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            keepalive: Duration::from_secs(15),
            outbox_capacity: 16,
        }
    }
}

impl From<&BroadcastConfig> for DispatcherConfig {
    fn from(config: &BroadcastConfig) -> Self {
        Self {
            keepalive: config.keepalive(),
            outbox_capacity: config.outbox_capacity,
        }
    }
}

/// Why a stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Writing a frame failed.
    WriteFailed(SinkError),
    /// The transport reported the connection gone.
    Disconnected,
    /// No producer can reach the outbox anymore.
    OutboxClosed,
    /// The server is shutting down.
    Shutdown,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::WriteFailed(e) => write!(f, "write failed: {}", e),
            CloseReason::Disconnected => write!(f, "disconnected"),
            CloseReason::OutboxClosed => write!(f, "outbox closed"),
            CloseReason::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// What woke the streaming loop.
enum Wake {
    Value(f64),
    Idle,
    OutboxClosed,
    Disconnected,
    Shutdown,
}

/// Per-connection loop bridging a session outbox to a frame sink.
pub struct StreamDispatcher<S> {
    registry: Arc<SessionRegistry>,
    encoder: Arc<dyn EventEncoder>,
    session: Session,
    sink: S,
    keepalive: Duration,
    shutdown: watch::Receiver<bool>,
}

impl<S: FrameSink> StreamDispatcher<S> {
    /// Open a session for `seed` and register it.
    ///
    /// The session is visible to the scheduler as soon as this returns.
    pub fn register(
        registry: Arc<SessionRegistry>,
        encoder: Arc<dyn EventEncoder>,
        config: &DispatcherConfig,
        seed: Seed,
        sink: S,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let session = Session::open(seed, config.outbox_capacity);
        registry.add(session.handle());

        Self {
            registry,
            encoder,
            session,
            sink,
            keepalive: config.keepalive,
            shutdown,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    /// Stream until the connection ends, then deregister.
    pub async fn run(mut self) -> CloseReason {
        let session_id = self.session.id();
        tracing::info!(session_id = %session_id, seed = %self.session.seed(), "Stream opened");

        let reason = self.stream().await;

        self.registry.remove(&session_id);
        tracing::info!(session_id = %session_id, reason = %reason, "Stream closed");
        reason
    }

    async fn stream(&mut self) -> CloseReason {
        let idle = time::sleep(self.keepalive);
        tokio::pin!(idle);

        loop {
            let wake = tokio::select! {
                value = self.session.next_value() => match value {
                    Some(value) => Wake::Value(value),
                    None => Wake::OutboxClosed,
                },
                _ = &mut idle => Wake::Idle,
                _ = self.sink.closed() => Wake::Disconnected,
                _ = shutdown_requested(&mut self.shutdown) => Wake::Shutdown,
            };

            let event = match wake {
                Wake::Value(value) => OutboundEvent::Value(value),
                Wake::Idle => {
                    // Re-arm now so a skipped keepalive cannot spin
                    idle.as_mut().reset(Instant::now() + self.keepalive);
                    OutboundEvent::Keepalive
                }
                Wake::OutboxClosed => return CloseReason::OutboxClosed,
                Wake::Disconnected => return CloseReason::Disconnected,
                Wake::Shutdown => return CloseReason::Shutdown,
            };

            let frame = match self.encoder.encode(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!(
                        session_id = %self.session.id(),
                        error = %e,
                        "Failed to encode event, skipping"
                    );
                    continue;
                }
            };

            // A reader that stops consuming can stall the write for good
            let written = tokio::select! {
                result = self.sink.write(frame) => result,
                _ = self.sink.closed() => return CloseReason::Disconnected,
                _ = shutdown_requested(&mut self.shutdown) => return CloseReason::Shutdown,
            };

            if let Err(e) = written {
                tracing::debug!(
                    session_id = %self.session.id(),
                    error = %e,
                    "Write failed, closing stream"
                );
                return CloseReason::WriteFailed(e);
            }

            idle.as_mut().reset(Instant::now() + self.keepalive);
        }
    }
}
