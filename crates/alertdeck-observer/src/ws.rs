//! `WebSocket` handler for live dashboard updates.
//!
//! Clients connect to `GET /ws` and receive a JSON-encoded
//! [`Snapshot`] text frame after every ingest. Each connection gets its
//! own subscription and runs as a [`ViewerSession`]; a failed or stalled
//! send ends that session only.

use std::sync::Arc;

use alertdeck_core::{SnapshotTransport, TransportError, ViewerSession};
use alertdeck_types::Snapshot;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, info};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming snapshots.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_events(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Subscribe before anything else so no snapshot published after the
/// upgrade is missed, then hand the socket to a viewer session.
async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let subscription = state.store.subscribe();
    info!(
        viewer = %subscription.id(),
        viewers = state.store.broadcaster().viewer_count(),
        "WebSocket connection to dashboard established"
    );

    let session = ViewerSession::new(
        WebSocketTransport::new(socket),
        subscription,
        state.viewer_send_timeout,
    );
    let report = session.run().await;
    debug!(viewer = %report.viewer, reason = ?report.reason, "WebSocket session ended");
}

/// [`SnapshotTransport`] over an Axum [`WebSocket`].
#[derive(Debug)]
pub struct WebSocketTransport {
    socket: WebSocket,
}

impl WebSocketTransport {
    /// Wrap an upgraded socket.
    pub const fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

impl SnapshotTransport for WebSocketTransport {
    async fn transmit(&mut self, snapshot: &Snapshot) -> Result<(), TransportError> {
        let json = serde_json::to_string(snapshot)?;
        self.socket
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn closed(&mut self) {
        loop {
            match self.socket.recv().await {
                Some(Ok(Message::Close(_)) | Err(_)) | None => return,
                Some(Ok(Message::Ping(data))) => {
                    if self.socket.send(Message::Pong(data)).await.is_err() {
                        return;
                    }
                }
                // Dashboards never send anything meaningful.
                Some(Ok(_)) => {}
            }
        }
    }
}
