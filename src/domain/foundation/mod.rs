//! Foundation module - Shared domain primitives.

mod ids;

pub use ids::SessionId;
