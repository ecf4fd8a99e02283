//! Process-wide shutdown signal.
//!
//! A `watch` channel carrying `true` once shutdown has been requested. The
//! scheduler and every dispatcher hold a receiver.

use tokio::sync::watch;

/// Create the shutdown channel, initially not signalled.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Resolve once shutdown is requested.
///
/// A dropped sender means nobody can request shutdown anymore, so this then
/// never resolves.
pub async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
