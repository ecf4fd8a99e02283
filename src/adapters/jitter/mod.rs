//! Jitter source adapters.
//!
//! - `UniformJitter` - Production source, uniform over `[0, 100)`
//! - `FixedJitter` - Constant draw for deterministic ticks

mod fixed;
mod uniform;

pub use fixed::FixedJitter;
pub use uniform::UniformJitter;
