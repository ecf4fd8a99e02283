//! HTTP DTOs for the broadcast endpoints.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of `GET /sse`.
///
/// The seed is kept raw so malformed input falls back to zero instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseQuery {
    pub query: Option<String>,
}

impl SseQuery {
    /// Build from decoded query pairs. A repeated `query` key keeps the first
    /// value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            query: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "query").then_some(value)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response of `GET /connections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionsResponse {
    /// Streaming connections currently held open by the transport.
    #[serde(rename = "open-connections")]
    pub open_connections: usize,

    /// Sessions currently registered for broadcast.
    pub sessions: usize,
}

/// Response of `GET /infos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfosResponse {
    /// Server start time, RFC 3339.
    pub started_at: String,
    pub uptime_secs: u64,
    /// Runtime worker threads.
    pub worker_threads: usize,
    /// Tasks currently alive on the runtime.
    pub alive_tasks: usize,
    pub sessions: usize,
    pub open_connections: usize,
}
