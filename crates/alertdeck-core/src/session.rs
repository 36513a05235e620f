//! One live viewer connection.
//!
//! A [`ViewerSession`] pulls snapshots from its [`Subscription`] and pushes
//! each one through a [`SnapshotTransport`] until the transport fails,
//! times out, or the peer goes away. There are no retries: a broken
//! viewer is torn down and a reconnecting client starts a new session that
//! only sees snapshots published after it subscribed.
//!
//! ```text
//! Connected --(snapshot sent)--> Connected
//! Connected --(send error | send timeout | peer closed | broadcaster gone)--> Closed
//! ```
//!
//! Closing always unsubscribes, releasing the viewer's queue.

use std::future::Future;
use std::time::Duration;

use alertdeck_types::Snapshot;
use tracing::{debug, info};

use crate::broadcast::{Subscription, ViewerId};

/// Default time allowed for delivering one snapshot to a viewer.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors a transport reports when a snapshot cannot be delivered.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The snapshot could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing to the connection failed.
    #[error("send failed: {0}")]
    Send(String),

    /// The connection is already closed.
    #[error("connection closed")]
    Closed,
}

/// The client side of a viewer session, e.g. a `WebSocket`.
pub trait SnapshotTransport: Send {
    /// Deliver one snapshot to the client.
    fn transmit(
        &mut self,
        snapshot: &Snapshot,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Resolve once the client has gone away.
    ///
    /// Polled concurrently with waiting for the next snapshot and dropped
    /// whenever a snapshot arrives, so it must be cancel safe.
    fn closed(&mut self) -> impl Future<Output = ()> + Send;
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The transport returned an error.
    TransmitFailed,
    /// A transmit did not finish within the send timeout.
    TransmitTimeout,
    /// The client disconnected.
    PeerClosed,
    /// Every broadcaster handle was dropped; nothing more will arrive.
    BroadcasterClosed,
}

/// Summary returned when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// The viewer's subscription identifier.
    pub viewer: ViewerId,
    /// Snapshots successfully transmitted.
    pub delivered: u64,
    /// Snapshots lost because the viewer fell behind.
    pub dropped: u64,
    /// Terminal transition.
    pub reason: CloseReason,
}

/// Pushes snapshots to one connected client.
#[derive(Debug)]
pub struct ViewerSession<T> {
    transport: T,
    subscription: Subscription,
    send_timeout: Duration,
}

impl<T: SnapshotTransport> ViewerSession<T> {
    /// Create a session in the `Connected` state.
    pub const fn new(transport: T, subscription: Subscription, send_timeout: Duration) -> Self {
        Self {
            transport,
            subscription,
            send_timeout,
        }
    }

    /// Run until the session closes, then unsubscribe.
    pub async fn run(self) -> SessionReport {
        let Self {
            mut transport,
            mut subscription,
            send_timeout,
        } = self;
        let viewer = subscription.id();
        let mut delivered: u64 = 0;

        info!(viewer = %viewer, "Viewer session connected");

        let reason = loop {
            tokio::select! {
                next = subscription.next() => {
                    let Some(snapshot) = next else {
                        break CloseReason::BroadcasterClosed;
                    };
                    match tokio::time::timeout(send_timeout, transport.transmit(&snapshot)).await {
                        Ok(Ok(())) => delivered = delivered.saturating_add(1),
                        Ok(Err(e)) => {
                            debug!(viewer = %viewer, error = %e, "Viewer transmit failed");
                            break CloseReason::TransmitFailed;
                        }
                        Err(elapsed) => {
                            debug!(viewer = %viewer, %elapsed, "Viewer transmit timed out");
                            break CloseReason::TransmitTimeout;
                        }
                    }
                }
                () = transport.closed() => break CloseReason::PeerClosed,
            }
        };

        let dropped = subscription.dropped();
        subscription.unsubscribe();

        info!(
            viewer = %viewer,
            delivered,
            dropped,
            reason = ?reason,
            "Viewer session closed"
        );

        SessionReport {
            viewer,
            delivered,
            dropped,
            reason,
        }
    }
}
