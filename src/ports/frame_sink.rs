//! FrameSink port - The write side of one streaming connection.
//!
//! The transport layer owns the actual socket. A sink is the narrow surface
//! the dispatcher needs from it: write a frame, and notice when the peer is
//! gone.

use async_trait::async_trait;
use bytes::Bytes;

/// Errors that end a stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The transport dropped the connection.
    #[error("Connection closed by transport")]
    Closed,

    /// Writing or flushing the frame failed.
    #[error("Write failed: {0}")]
    Write(String),
}

/// Port for writing frames to one subscriber connection.
///
/// Implementations must ensure:
/// - A successful `write` means the frame has been handed to the transport
/// - Once a `write` fails, the connection is considered dead
/// - `closed` resolves when the transport has given up on the connection
///
/// Both methods take `&self` so a caller can wait on `closed` while a
/// `write` is pending. A slow reader may keep `write` pending indefinitely.
#[async_trait]
pub trait FrameSink: Send + Sync {
    /// Write and flush one frame.
    async fn write(&self, frame: Bytes) -> Result<(), SinkError>;

    /// Resolves once the transport has dropped the connection.
    ///
    /// This is a best-effort notification. A transport may never signal it,
    /// so callers must still treat a failed `write` as disconnection.
    async fn closed(&self);
}
