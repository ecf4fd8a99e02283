//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the broadcast core and the outside world. Adapters implement these ports.
//!
//! - `JitterSource` - Randomness mixed into every tick's values
//! - `EventEncoder` - Wire framing of outbound events
//! - `FrameSink` - Write side of a streaming connection

mod event_encoder;
mod frame_sink;
mod jitter_source;

pub use event_encoder::{EncodeError, EventEncoder};
pub use frame_sink::{FrameSink, SinkError};
pub use jitter_source::JitterSource;
