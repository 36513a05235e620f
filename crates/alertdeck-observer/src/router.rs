//! Axum router construction for the API server.
//!
//! Assembles all routes (ingest, reads, `WebSocket`, static assets) into a
//! single [`Router`] with CORS enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `POST /` -- alert ingest (any other method gets `400`)
/// - `GET /events` -- current snapshot
/// - `GET /config` -- dashboard display settings
/// - `GET /healthz` -- liveness probe
/// - `GET /ws` -- `WebSocket` snapshot stream
/// - `GET /ui/*` -- dashboard assets, when [`AppState::assets_dir`] is set
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // Ingest
        .route("/", post(handlers::ingest).fallback(handlers::require_post))
        // Reads
        .route("/events", get(handlers::events))
        .route("/config", get(handlers::ui_config))
        .route("/healthz", get(handlers::healthz))
        // WebSocket
        .route("/ws", get(ws::ws_events));

    if let Some(dir) = &state.assets_dir {
        router = router.nest_service("/ui", ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
