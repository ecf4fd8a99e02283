//! Subscriber-supplied numeric seed.

use serde::Serialize;
use std::fmt;

/// Numeric seed a subscriber passes when opening a stream.
///
/// Parsing fails soft: absent, unparsable and non-finite input all yield zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Seed(f64);

impl Seed {
    /// Creates a seed, replacing non-finite values with zero.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// Parses the raw query value.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse::<f64>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
