//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `jitter` - random and fixed jitter sources
//! - `sse` - Server-Sent Events encoding and the streaming body sink
//! - `http` - axum routes and handlers

pub mod http;
pub mod jitter;
pub mod sse;

pub use jitter::{FixedJitter, UniformJitter};
pub use sse::{frame_channel, ChannelSink, FrameStream, SseEncoder};
