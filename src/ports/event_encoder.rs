//! EventEncoder port - Serializes outbound events into wire frames.
//!
//! The dispatcher does not know the wire format. It hands each
//! [`OutboundEvent`] to an encoder and writes the resulting bytes.

use bytes::Bytes;

use crate::domain::broadcast::OutboundEvent;

/// Errors raised while turning an event into a frame.
///
/// The dispatcher treats these as a skipped delivery, never as a reason to
/// close the connection.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Payload could not be serialized.
    #[error("Failed to serialize event payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The value has no JSON representation.
    #[error("Value {0} is not a finite number")]
    NonFinite(f64),
}

/// Port for encoding events into a line-oriented wire framing.
pub trait EventEncoder: Send + Sync {
    /// Encode one event into a complete, self-delimiting frame.
    fn encode(&self, event: &OutboundEvent) -> Result<Bytes, EncodeError>;
}
