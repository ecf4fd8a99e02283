//! Uniformly distributed jitter backed by the thread-local RNG.

use rand::Rng;

use crate::domain::broadcast::JITTER_UPPER_BOUND;
use crate::ports::JitterSource;

/// Draws uniformly from `[0, JITTER_UPPER_BOUND)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformJitter;

impl UniformJitter {
    pub fn new() -> Self {
        Self
    }
}

impl JitterSource for UniformJitter {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..JITTER_UPPER_BOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let jitter = UniformJitter::new();
        for _ in 0..10_000 {
            let j = jitter.draw();
            assert!((0.0..JITTER_UPPER_BOUND).contains(&j), "out of range: {}", j);
        }
    }

    #[test]
    fn draws_vary() {
        let jitter = UniformJitter::new();
        let first = jitter.draw();
        assert!((0..100).map(|_| jitter.draw()).any(|j| j != first));
    }
}
