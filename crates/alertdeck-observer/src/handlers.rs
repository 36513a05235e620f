//! HTTP endpoint handlers for the API server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/` | Ingest one alert from the collector |
//! | `GET` | `/events` | Current snapshot (events, stats, outputs, retention) |
//! | `GET` | `/config` | Dashboard display settings |
//! | `GET` | `/healthz` | Liveness probe |

use std::sync::Arc;

use alertdeck_types::IngestRequest;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use tracing::debug;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST / -- ingest
// ---------------------------------------------------------------------------

/// Accept an alert posted by the upstream collector.
///
/// The body is decoded here, before the store is touched; anything that
/// is not a well-formed [`IngestRequest`] is rejected with `400` and the
/// store is left unchanged. The `Content-Type` header is not checked.
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ObserverError> {
    if body.is_empty() {
        return Err(ObserverError::InvalidBody(String::from("empty body")));
    }

    let request: IngestRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejected malformed ingest body");
        ObserverError::InvalidBody(e.to_string())
    })?;

    let origin = request.origin.clone();
    let snapshot = state.store.ingest_request(request).await;
    debug!(
        origin = %origin,
        retained = snapshot.events.len(),
        "Alert accepted"
    );

    Ok(StatusCode::OK)
}

/// Reject any method other than `POST` on the ingest route.
pub async fn require_post(method: Method) -> ObserverError {
    ObserverError::MethodNotAllowed(method.to_string())
}

// ---------------------------------------------------------------------------
// GET /events, /config, /healthz
// ---------------------------------------------------------------------------

/// Return the current store snapshot.
pub async fn events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.snapshot().await)
}

/// Return the dashboard's display settings.
pub async fn ui_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.ui)
}

/// Liveness probe.
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
