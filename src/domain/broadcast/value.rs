//! Per-session value computation.

use crate::domain::session::Seed;

/// Exclusive upper bound of a jitter draw. Draws fall in `[0, JITTER_UPPER_BOUND)`.
pub const JITTER_UPPER_BOUND: f64 = 100.0;

/// Value delivered to a session for one tick.
pub fn compute_value(seed: Seed, jitter: f64) -> f64 {
    seed.value() + jitter
}
