//! HTTP adapters - axum routes exposing the broadcaster.
//!
//! [`app_router`] assembles the complete application: the broadcast routes
//! plus the cross-cutting layers (CORS, panic recovery, request tracing and
//! a timeout on the short-lived routes).

pub mod broadcast;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use broadcast::{ops_routes, stream_routes, BroadcastAppState};

/// Build the application router.
///
/// The request timeout only wraps the operational routes; streams stay open
/// for as long as the client listens.
pub fn app_router(state: BroadcastAppState, config: &ServerConfig) -> Router {
    let ops = ops_routes().layer(TimeoutLayer::new(config.request_timeout()));

    Router::new()
        .merge(stream_routes())
        .merge(ops)
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

/// CORS for the configured origins, or any origin when none are configured.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let configured = config.cors_origins_list();
    if configured.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}
