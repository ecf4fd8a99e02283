//! Axum router configuration for the broadcast endpoints.
//!
//! Streaming and operational routes are split so that per-request limits
//! such as timeouts can be applied to the short-lived routes only.

use axum::{routing::get, Router};

use super::handlers::{connections, health, infos, stream_values, BroadcastAppState};

/// Long-lived streaming routes.
///
/// # Routes
/// - `GET /sse` - Open a value stream
pub fn stream_routes() -> Router<BroadcastAppState> {
    Router::new().route("/sse", get(stream_values))
}

/// Short-lived operational routes.
///
/// # Routes
/// - `GET /health` - Liveness probe
/// - `GET /connections` - Connection and session counts
/// - `GET /infos` - Runtime information
pub fn ops_routes() -> Router<BroadcastAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/connections", get(connections))
        .route("/infos", get(infos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use futures::StreamExt;
    use tower::ServiceExt;

    use crate::adapters::http::broadcast::dto::{ConnectionsResponse, InfosResponse};
    use crate::adapters::jitter::FixedJitter;
    use crate::application::{shutdown_channel, BroadcastScheduler, DispatcherConfig};
    use crate::domain::session::SessionRegistry;

    fn test_state() -> (BroadcastAppState, tokio::sync::watch::Sender<bool>) {
        let (tx, rx) = shutdown_channel();
        let state = BroadcastAppState::new(
            Arc::new(SessionRegistry::new()),
            DispatcherConfig::default(),
            rx,
        );
        (state, tx)
    }

    fn app(state: BroadcastAppState) -> Router {
        Router::new()
            .merge(stream_routes())
            .merge(ops_routes())
            .with_state(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn wait_until_empty(registry: &SessionRegistry) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !registry.is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("session should be deregistered");
    }

    #[test]
    fn routes_compile_with_state() {
        let (state, _tx) = test_state();
        let _: Router<()> = stream_routes().merge(ops_routes()).with_state(state);
    }

    #[tokio::test]
    async fn health_returns_ok_with_empty_body() {
        let (state, _tx) = test_state();

        let response = app(state).oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn connections_reports_zero_when_idle() {
        let (state, _tx) = test_state();

        let response = app(state).oneshot(get_request("/connections")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let counts: ConnectionsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            counts,
            ConnectionsResponse {
                open_connections: 0,
                sessions: 0
            }
        );
    }

    #[tokio::test]
    async fn infos_reports_runtime_details() {
        let (state, _tx) = test_state();
        let started_at = state.started_at.to_rfc3339();

        let response = app(state).oneshot(get_request("/infos")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let infos: InfosResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(infos.started_at, started_at);
        assert!(infos.worker_threads >= 1);
        assert_eq!(infos.sessions, 0);
    }

    #[tokio::test]
    async fn sse_sets_event_stream_headers_and_registers_session() {
        let (state, _tx) = test_state();
        let registry = state.registry.clone();

        let response = app(state).oneshot(get_request("/sse?query=10")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
        assert_eq!(headers[header::CONNECTION], "keep-alive");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshot()[0].seed().value(), 10.0);
    }

    #[tokio::test]
    async fn sse_streams_seed_plus_jitter() {
        let (state, _tx) = test_state();
        let registry = state.registry.clone();
        let scheduler = BroadcastScheduler::new(registry.clone(), Arc::new(FixedJitter::new(5.0)));

        let response = app(state).oneshot(get_request("/sse?query=100")).await.unwrap();
        let mut frames = response.into_body().into_data_stream();

        scheduler.tick().await;
        let frame = frames.next().await.unwrap().unwrap();

        assert_eq!(
            frame,
            "event: current-value\nretry: 15000\ndata: {\"data\":105.0}\n\n"
        );
    }

    #[tokio::test]
    async fn sse_with_invalid_query_uses_zero_seed() {
        let (state, _tx) = test_state();
        let registry = state.registry.clone();

        for uri in ["/sse", "/sse?query=abc", "/sse?query=", "/sse?query", "/sse?query=%FF"] {
            let _response = app(state.clone()).oneshot(get_request(uri)).await.unwrap();
            let handle = registry.snapshot().pop().unwrap();
            assert_eq!(handle.seed().value(), 0.0, "{}", uri);
            registry.remove(&handle.id());
        }
    }

    #[tokio::test]
    async fn sse_with_repeated_query_uses_first_value() {
        let (state, _tx) = test_state();
        let registry = state.registry.clone();

        let response = app(state)
            .oneshot(get_request("/sse?query=1&query=2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(registry.snapshot()[0].seed().value(), 1.0);
    }

    #[tokio::test]
    async fn dropping_the_body_deregisters_the_session() {
        let (state, _tx) = test_state();
        let registry = state.registry.clone();
        let connections = state.connections.clone();

        let response = app(state).oneshot(get_request("/sse?query=1")).await.unwrap();
        assert_eq!(connections.open_connections(), 1);

        drop(response);

        wait_until_empty(&registry).await;
        tokio::time::timeout(Duration::from_secs(1), async {
            while connections.open_connections() != 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("connection should be released");
    }

    #[tokio::test]
    async fn shutdown_ends_open_streams() {
        let (state, tx) = test_state();
        let registry = state.registry.clone();

        let response = app(state).oneshot(get_request("/sse")).await.unwrap();
        let mut frames = response.into_body().into_data_stream();

        tx.send(true).unwrap();

        let end = tokio::time::timeout(Duration::from_secs(1), frames.next())
            .await
            .expect("body should end");
        assert!(end.is_none());
        wait_until_empty(&registry).await;
    }
}
