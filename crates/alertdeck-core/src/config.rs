//! Store sizing configuration.
//!
//! Only two knobs affect core behaviour: how many events the buffer
//! retains and how far a viewer may fall behind before it starts losing
//! the oldest queued snapshots.

/// Default number of retained events.
pub const DEFAULT_RETENTION: usize = 200;

/// Default per-viewer backlog, in snapshots.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 32;

/// Sizing for an [`EventStore`](crate::EventStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of events kept in the buffer. Zero keeps none.
    pub retention: usize,
    /// Snapshots a viewer may lag behind before the oldest are dropped.
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Configuration with the given retention and the default queue size.
    pub const fn with_retention(retention: usize) -> Self {
        Self {
            retention,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }

    /// Configuration from a signed retention value; negatives become zero.
    pub fn with_signed_retention(retention: i64) -> Self {
        let retention = usize::try_from(retention.max(0)).unwrap_or(usize::MAX);
        Self::with_retention(retention)
    }

    /// Override the per-viewer backlog.
    #[must_use]
    pub const fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }
}
