//! Bounded fan-out of store snapshots to live viewers.
//!
//! Built on [`tokio::sync::broadcast`]: every [`Subscription`] owns an
//! independent cursor over a shared ring of `capacity` snapshots, so each
//! viewer sees every snapshot published while it is subscribed, in
//! publish order, regardless of how fast other viewers consume.
//!
//! [`Broadcaster::publish`] never waits. When a viewer falls more than
//! `capacity` snapshots behind, the oldest ones it has not read are
//! overwritten; the viewer is told how many it lost and resumes from the
//! oldest still queued. Only the latest state matters to a dashboard, so
//! a dropped snapshot is superseded rather than an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use alertdeck_types::Snapshot;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Identifier assigned to each subscription, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewerId(pub u64);

impl core::fmt::Display for ViewerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "viewer-{}", self.0)
    }
}

/// Publishing half of the snapshot fan-out.
///
/// Cheap to clone; all clones feed the same set of subscriptions.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<Arc<Snapshot>>,
    next_viewer: Arc<AtomicU64>,
}

impl Broadcaster {
    /// Create a broadcaster whose viewers may lag by up to `capacity`
    /// snapshots. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            next_viewer: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Queue a snapshot for every current subscription.
    ///
    /// Returns the number of subscriptions it was queued for; zero when
    /// no viewer is connected, which is not an error.
    pub fn publish(&self, snapshot: Arc<Snapshot>) -> usize {
        // send only fails when there are no receivers.
        self.tx.send(snapshot).unwrap_or(0)
    }

    /// Register a new viewer. It receives only snapshots published from
    /// now on.
    pub fn subscribe(&self) -> Subscription {
        let id = ViewerId(self.next_viewer.fetch_add(1, Ordering::Relaxed));
        debug!(viewer = %id, "Viewer subscribed");
        Subscription {
            id,
            rx: self.tx.subscribe(),
            dropped: 0,
        }
    }

    /// Number of live subscriptions.
    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One viewer's private, ordered stream of snapshots.
///
/// Dropping the subscription unsubscribes it and frees its cursor.
#[derive(Debug)]
pub struct Subscription {
    id: ViewerId,
    rx: broadcast::Receiver<Arc<Snapshot>>,
    dropped: u64,
}

impl Subscription {
    /// This subscription's identifier.
    pub const fn id(&self) -> ViewerId {
        self.id
    }

    /// Snapshots this viewer lost by falling behind.
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once every [`Broadcaster`] handle is gone. Cancel
    /// safe: dropping the future before it completes loses nothing.
    pub async fn next(&mut self) -> Option<Arc<Snapshot>> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next snapshot if one is already queued.
    pub fn try_next(&mut self) -> Option<Arc<Snapshot>> {
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => return None,
            }
        }
    }

    /// Stop receiving snapshots and release this viewer's queue.
    pub fn unsubscribe(self) {
        debug!(viewer = %self.id, dropped = self.dropped, "Viewer unsubscribed");
    }

    fn record_lag(&mut self, skipped: u64) {
        self.dropped = self.dropped.saturating_add(skipped);
        warn!(
            viewer = %self.id,
            skipped,
            "Viewer fell behind, oldest snapshots dropped"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snap(retention: usize) -> Arc<Snapshot> {
        Arc::new(Snapshot::empty(retention))
    }

    #[test]
    fn publish_without_viewers_is_not_an_error() {
        let b = Broadcaster::new(4);
        assert_eq!(b.publish(snap(1)), 0);
        assert_eq!(b.viewer_count(), 0);
    }

    #[tokio::test]
    async fn every_viewer_sees_every_snapshot_in_order() {
        let b = Broadcaster::new(8);
        let mut first = b.subscribe();
        let mut second = b.subscribe();
        assert_ne!(first.id(), second.id());

        for i in 0..5 {
            assert_eq!(b.publish(snap(i)), 2);
        }

        for i in 0..5 {
            assert_eq!(first.next().await.unwrap().retention, i);
        }
        for i in 0..5 {
            assert_eq!(second.next().await.unwrap().retention, i);
        }
        assert!(first.try_next().is_none());
    }

    #[test]
    fn slow_viewer_drops_oldest_and_never_blocks_publisher() {
        let b = Broadcaster::new(2);
        let mut slow = b.subscribe();

        for i in 0..10 {
            b.publish(snap(i));
        }

        assert_eq!(slow.try_next().unwrap().retention, 8);
        assert_eq!(slow.try_next().unwrap().retention, 9);
        assert!(slow.try_next().is_none());
        assert_eq!(slow.dropped(), 8);
    }

    #[test]
    fn late_subscriber_gets_only_future_snapshots() {
        let b = Broadcaster::new(4);
        b.publish(snap(1));
        let mut late = b.subscribe();
        assert!(late.try_next().is_none());
        b.publish(snap(2));
        assert_eq!(late.try_next().unwrap().retention, 2);
    }

    #[test]
    fn unsubscribe_releases_viewer() {
        let b = Broadcaster::new(4);
        let a = b.subscribe();
        let c = b.subscribe();
        assert_eq!(b.viewer_count(), 2);
        a.unsubscribe();
        assert_eq!(b.viewer_count(), 1);
        drop(c);
        assert_eq!(b.viewer_count(), 0);
    }

    #[tokio::test]
    async fn next_returns_none_when_broadcaster_is_gone() {
        let b = Broadcaster::new(4);
        let mut sub = b.subscribe();
        drop(b);
        assert!(sub.next().await.is_none());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let b = Broadcaster::new(0);
        let mut sub = b.subscribe();
        b.publish(snap(1));
        b.publish(snap(2));
        assert_eq!(sub.try_next().unwrap().retention, 2);
        assert_eq!(sub.dropped(), 1);
    }
}
