//! HTTP handlers for the broadcast endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{Json, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::adapters::sse::{frame_channel, SseEncoder};
use crate::application::{ConnectionTracker, DispatcherConfig, StreamDispatcher};
use crate::domain::session::{Seed, SessionRegistry};
use crate::ports::EventEncoder;

use super::dto::{ConnectionsResponse, InfosResponse, SseQuery};

/// Frames buffered between a dispatcher and its response body.
const BODY_BUFFER_FRAMES: usize = 8;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the broadcast endpoints.
#[derive(Clone)]
pub struct BroadcastAppState {
    pub registry: Arc<SessionRegistry>,
    pub encoder: Arc<dyn EventEncoder>,
    pub connections: Arc<ConnectionTracker>,
    pub dispatcher: DispatcherConfig,
    pub shutdown: watch::Receiver<bool>,
    pub started_at: DateTime<Utc>,
    started: Instant,
}

impl BroadcastAppState {
    pub fn new(
        registry: Arc<SessionRegistry>,
        dispatcher: DispatcherConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            registry,
            encoder: Arc::new(SseEncoder::default()),
            connections: Arc::new(ConnectionTracker::new()),
            dispatcher,
            shutdown,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// `GET /health` - Liveness probe.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /sse?query=<float>` - Open a value stream.
///
/// The session is registered before the response is returned, so the next
/// tick already reaches it. The stream runs on its own task and ends when
/// the client goes away or the server shuts down.
pub async fn stream_values(
    State(state): State<BroadcastAppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = SseQuery::from_pairs(pairs);
    let guard = state.connections.open();
    let seed = Seed::parse(params.query.as_deref());
    let (sink, body) = frame_channel(BODY_BUFFER_FRAMES);

    let dispatcher = StreamDispatcher::register(
        state.registry.clone(),
        state.encoder.clone(),
        &state.dispatcher,
        seed,
        sink,
        state.shutdown.clone(),
    );

    tokio::spawn(async move {
        let _guard = guard;
        dispatcher.run().await
    });

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Body::from_stream(body),
    )
        .into_response()
}

/// `GET /connections` - Open connection and session counts.
pub async fn connections(State(state): State<BroadcastAppState>) -> Json<ConnectionsResponse> {
    Json(ConnectionsResponse {
        open_connections: state.connections.open_connections(),
        sessions: state.registry.len(),
    })
}

/// `GET /infos` - Process and runtime information.
pub async fn infos(State(state): State<BroadcastAppState>) -> Json<InfosResponse> {
    let metrics = tokio::runtime::Handle::current().metrics();

    Json(InfosResponse {
        started_at: state.started_at.to_rfc3339(),
        uptime_secs: state.uptime_secs(),
        worker_threads: metrics.num_workers(),
        alive_tasks: metrics.num_alive_tasks(),
        sessions: state.registry.len(),
        open_connections: state.connections.open_connections(),
    })
}
