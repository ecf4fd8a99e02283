//! Broadcast domain module.
//!
//! Value computation for a tick and the events a dispatcher writes out.

mod events;
mod value;

pub use events::OutboundEvent;
pub use value::{compute_value, JITTER_UPPER_BOUND};
