//! Server-Sent Events framing.
//!
//! Value frames:
//!
//! ```text
//! event: current-value
//! retry: 15000
//! data: {"data":105.0}
//!
//! ```
//!
//! Keepalive frames are a comment line followed by a blank line
//! (`:keepalive\n\n`), so every frame on the wire is blank-line terminated.

use bytes::Bytes;
use serde::Serialize;

use crate::domain::broadcast::OutboundEvent;
use crate::ports::{EncodeError, EventEncoder};

/// Event name used for broadcast values.
pub const CURRENT_VALUE_EVENT: &str = "current-value";

/// Client reconnect delay advertised in every value frame, in milliseconds.
pub const RETRY_MS: u64 = 15_000;

/// Canonical keepalive frame.
pub const KEEPALIVE_FRAME: &str = ":keepalive\n\n";

#[derive(Serialize)]
struct ValuePayload {
    data: f64,
}

/// Encodes outbound events as `text/event-stream` frames.
#[derive(Debug, Clone)]
pub struct SseEncoder {
    event_type: String,
    retry_ms: u64,
}

impl SseEncoder {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            retry_ms: RETRY_MS,
        }
    }

    pub fn with_retry_ms(mut self, retry_ms: u64) -> Self {
        self.retry_ms = retry_ms;
        self
    }
}

impl Default for SseEncoder {
    fn default() -> Self {
        Self::new(CURRENT_VALUE_EVENT)
    }
}

impl EventEncoder for SseEncoder {
    fn encode(&self, event: &OutboundEvent) -> Result<Bytes, EncodeError> {
        match *event {
            OutboundEvent::Value(value) => {
                if !value.is_finite() {
                    return Err(EncodeError::NonFinite(value));
                }
                let json = serde_json::to_string(&ValuePayload { data: value })?;
                Ok(Bytes::from(format!(
                    "event: {}\nretry: {}\ndata: {}\n\n",
                    self.event_type, self.retry_ms, json
                )))
            }
            OutboundEvent::Keepalive => Ok(Bytes::from_static(KEEPALIVE_FRAME.as_bytes())),
        }
    }
}
