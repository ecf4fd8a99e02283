//! Open connection counting.
//!
//! Counts live streaming connections at the transport level, independent of
//! the registry. A connection is counted from the moment its guard is taken
//! until the guard drops, which includes the short windows before a session
//! is registered and after it is deregistered.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of open connections.
#[derive(Debug, Default)]
pub struct ConnectionTracker {
    open: AtomicUsize,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a new connection until the returned guard is dropped.
    pub fn open(self: &Arc<Self>) -> ConnectionGuard {
        self.open.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            tracker: Arc::clone(self),
        }
    }

    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

/// Keeps one connection counted while alive.
#[derive(Debug)]
pub struct ConnectionGuard {
    tracker: Arc<ConnectionTracker>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.tracker.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_count_open_connections() {
        let tracker = Arc::new(ConnectionTracker::new());
        assert_eq!(tracker.open_connections(), 0);

        let first = tracker.open();
        let second = tracker.open();
        assert_eq!(tracker.open_connections(), 2);

        drop(first);
        assert_eq!(tracker.open_connections(), 1);
        drop(second);
        assert_eq!(tracker.open_connections(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_guards_balance_out() {
        let tracker = Arc::new(ConnectionTracker::new());

        let tasks: Vec<_> = (0..100)
            .map(|_| {
                let tracker = tracker.clone();
                tokio::spawn(async move {
                    let _guard = tracker.open();
                    tokio::task::yield_now().await;
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(tracker.open_connections(), 0);
    }
}
