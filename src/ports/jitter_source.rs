//! JitterSource port - Randomness used to perturb each broadcast value.
//!
//! Kept behind a trait so ticks can be made deterministic under test.

/// Source of jitter draws added to a session's seed on every tick.
///
/// Implementations must return values in `[0, JITTER_UPPER_BOUND)`
/// (see [`crate::domain::broadcast::JITTER_UPPER_BOUND`]) and must be safe
/// to call from concurrent deliveries.
pub trait JitterSource: Send + Sync {
    /// Draw one jitter value.
    fn draw(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl JitterSource for Constant {
        fn draw(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn usable_as_trait_object() {
        let source: Box<dyn JitterSource> = Box::new(Constant(3.0));
        assert_eq!(source.draw(), 3.0);
    }
}
