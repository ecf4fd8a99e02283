//! Per-subscriber session state and its outbox.
//!
//! A session is split in two halves:
//!
//! - [`SessionHandle`] is the shareable half. The registry stores it and the
//!   scheduler uses it to enqueue values.
//! - [`Session`] is the owning half. It holds the only receiver of the outbox
//!   and belongs to the dispatcher serving the connection.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::foundation::SessionId;

use super::Seed;

/// Result of one enqueue attempt into a session outbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The value is queued for the dispatcher.
    Delivered,
    /// The outbox stayed full for the whole delivery window.
    TimedOut,
    /// The dispatcher is gone and nobody drains the outbox.
    Closed,
}

/// Registry-visible half of a session.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    seed: Seed,
    outbox: mpsc::Sender<f64>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Enqueue a value, waiting at most `within` for outbox capacity.
    pub async fn deliver(&self, value: f64, within: Duration) -> Delivery {
        match tokio::time::timeout(within, self.outbox.send(value)).await {
            Ok(Ok(())) => Delivery::Delivered,
            Ok(Err(_)) => Delivery::Closed,
            Err(_) => Delivery::TimedOut,
        }
    }

    /// True once the owning [`Session`] has been dropped.
    pub fn is_closed(&self) -> bool {
        self.outbox.is_closed()
    }
}

/// Dispatcher-owned half of a session.
#[derive(Debug)]
pub struct Session {
    handle: Arc<SessionHandle>,
    outbox: mpsc::Receiver<f64>,
}

impl Session {
    /// Open a session with a bounded outbox of `capacity` values.
    pub fn open(seed: Seed, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            handle: Arc::new(SessionHandle {
                id: SessionId::new(),
                seed,
                outbox: tx,
            }),
            outbox: rx,
        }
    }

    pub fn id(&self) -> SessionId {
        self.handle.id
    }

    pub fn seed(&self) -> Seed {
        self.handle.seed
    }

    pub fn handle(&self) -> Arc<SessionHandle> {
        Arc::clone(&self.handle)
    }

    /// Wait for the next queued value.
    ///
    /// Returns `None` only when no handle can enqueue anymore. The session
    /// keeps its own handle alive, so in practice this waits indefinitely.
    pub async fn next_value(&mut self) -> Option<f64> {
        self.outbox.recv().await
    }

    /// Take a queued value without waiting.
    pub fn try_next_value(&mut self) -> Option<f64> {
        self.outbox.try_recv().ok()
    }
}
