//! Session domain module.
//!
//! A session is the server-side state of one streaming subscriber: its
//! identity, the seed it supplied, and the outbox the scheduler fills.
//! The [`SessionRegistry`] tracks which sessions are live.

mod registry;
mod seed;
mod state;

pub use registry::SessionRegistry;
pub use seed::Seed;
pub use state::{Delivery, Session, SessionHandle};
