//! HTTP adapter for the broadcast endpoints.
//!
//! - `GET /sse?query=<float>` - Stream values as Server-Sent Events
//! - `GET /health` - Liveness probe
//! - `GET /connections` - Open connections and registered sessions
//! - `GET /infos` - Uptime and runtime information

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ConnectionsResponse, InfosResponse, SseQuery};
pub use handlers::BroadcastAppState;
pub use routes::{ops_routes, stream_routes};
