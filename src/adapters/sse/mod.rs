//! Server-Sent Events adapters.
//!
//! - `SseEncoder` - `EventEncoder` producing `text/event-stream` frames
//! - `ChannelSink` / `FrameStream` - `FrameSink` bridged to a streaming response body

mod channel_sink;
mod encoder;

pub use channel_sink::{frame_channel, ChannelSink, FrameStream};
pub use encoder::{SseEncoder, CURRENT_VALUE_EVENT, KEEPALIVE_FRAME, RETRY_MS};
