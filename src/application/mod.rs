//! Application layer - Orchestrates sessions, ticks and streams.
//!
//! - `scheduler` - periodic fan-out of values to every registered session
//! - `dispatcher` - per-connection streaming loop and its lifecycle
//! - `connections` - open connection accounting
//! - `shutdown` - process-wide stop signal

pub mod connections;
pub mod dispatcher;
pub mod scheduler;
pub mod shutdown;

pub use connections::{ConnectionGuard, ConnectionTracker};
pub use dispatcher::{CloseReason, DispatcherConfig, StreamDispatcher};
pub use scheduler::{BroadcastScheduler, SchedulerConfig, StopReason, TickReport};
pub use shutdown::{shutdown_channel, shutdown_requested};
