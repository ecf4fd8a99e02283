//! Livecast - Live-value broadcaster over Server-Sent Events.
//!
//! Subscribers open `GET /sse?query=<seed>` and receive `seed + jitter`
//! on every broadcast tick, with keepalive frames while idle.
//!
//! Layout follows ports and adapters:
//! - `domain` - sessions, seeds, the registry and value computation
//! - `ports` - jitter, encoding and frame sink seams
//! - `application` - the broadcast scheduler and per-connection dispatcher
//! - `adapters` - SSE encoding, the streaming body sink and HTTP routes
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
