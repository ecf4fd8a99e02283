//! Deterministic jitter for tests and reproducible demos.

use crate::ports::JitterSource;

/// Always draws the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(f64);

impl FixedJitter {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
}

impl JitterSource for FixedJitter {
    fn draw(&self) -> f64 {
        self.0
    }
}
