//! Domain layer containing the broadcaster's core types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers)
//! - `session` - Subscriber sessions, their outboxes and the live registry
//! - `broadcast` - Tick value computation and outbound events

pub mod broadcast;
pub mod foundation;
pub mod session;
