//! Events written to a subscriber's stream.

/// One frame-worth of output for a subscriber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutboundEvent {
    /// A freshly computed broadcast value.
    Value(f64),
    /// Idle filler keeping intermediaries from closing the connection.
    Keepalive,
}
