//! The process-wide alert store.
//!
//! [`EventStore`] owns the bounded event buffer, the latest statistic set
//! reported by each origin, the aggregate derived from those sets, and the
//! most recent output-channel list. All four are guarded by one
//! [`RwLock`]: [`EventStore::ingest`] mutates them under the write lock,
//! reads share the read lock and always see a whole ingest or none of it.
//!
//! The store is constructed explicitly and handed around behind an
//! [`Arc`]; nothing here is global, so tests build as many as they like.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use alertdeck_types::{IngestRequest, OriginId, Snapshot, StatSet};
use tokio::sync::RwLock;
use tracing::debug;

use crate::aggregate::aggregate;
use crate::broadcast::{Broadcaster, Subscription};
use crate::config::StoreConfig;

/// Mutable state, only ever touched under the store's lock.
#[derive(Debug, Default)]
struct StoreState {
    /// Retained events, oldest first. Never longer than the retention.
    buffer: VecDeque<serde_json::Value>,
    /// Latest statistic set per origin; a new submission replaces the old.
    stats_by_origin: BTreeMap<OriginId, StatSet>,
    /// Cache of [`aggregate`] over `stats_by_origin`.
    aggregate: StatSet,
    /// Output channels from the most recent submission.
    outputs: Vec<String>,
}

impl StoreState {
    fn to_snapshot(&self, retention: usize) -> Snapshot {
        Snapshot {
            events: self.buffer.iter().cloned().collect(),
            stats: self.aggregate.clone(),
            outputs: self.outputs.clone(),
            retention,
        }
    }
}

/// Bounded, concurrently accessible alert store.
#[derive(Debug)]
pub struct EventStore {
    retention: usize,
    state: RwLock<StoreState>,
    broadcaster: Broadcaster,
}

impl EventStore {
    /// Create an empty store.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            retention: config.retention,
            state: RwLock::new(StoreState::default()),
            broadcaster: Broadcaster::new(config.broadcast_capacity),
        }
    }

    /// Maximum number of retained events.
    pub const fn retention(&self) -> usize {
        self.retention
    }

    /// The broadcaster snapshots are published to.
    pub const fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Subscribe a new viewer to snapshots published after this call.
    pub fn subscribe(&self) -> Subscription {
        self.broadcaster.subscribe()
    }

    /// Record one submission from `origin`.
    ///
    /// As a single step under the write lock: replaces the outputs list,
    /// appends `event` (evicting the oldest event first when the buffer is
    /// full), replaces the origin's statistic set and recomputes the
    /// aggregate. The resulting snapshot is published before the lock is
    /// released, so publish order always matches mutation order, and is
    /// returned to the caller.
    pub async fn ingest(
        &self,
        origin: OriginId,
        event: serde_json::Value,
        stats: StatSet,
        outputs: Vec<String>,
    ) -> Arc<Snapshot> {
        let mut state = self.state.write().await;

        state.outputs = outputs;

        if self.retention == 0 {
            state.buffer.clear();
        } else {
            while state.buffer.len() >= self.retention {
                state.buffer.pop_front();
            }
            state.buffer.push_back(event);
        }

        state.stats_by_origin.insert(origin, stats);
        state.aggregate = aggregate(state.stats_by_origin.values());

        let snapshot = Arc::new(state.to_snapshot(self.retention));
        let viewers = self.broadcaster.publish(Arc::clone(&snapshot));
        debug!(
            buffered = state.buffer.len(),
            origins = state.stats_by_origin.len(),
            viewers,
            "Event ingested"
        );
        snapshot
    }

    /// [`ingest`](Self::ingest) a decoded collector request.
    pub async fn ingest_request(&self, request: IngestRequest) -> Arc<Snapshot> {
        self.ingest(
            request.origin,
            request.event,
            request.stats,
            request.outputs,
        )
        .await
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.to_snapshot(self.retention)
    }

    /// The latest statistic set reported by `origin`, if any.
    pub async fn origin_stats(&self, origin: &OriginId) -> Option<StatSet> {
        self.state.read().await.stats_by_origin.get(origin).cloned()
    }

    /// Number of distinct origins that have submitted.
    pub async fn origin_count(&self) -> usize {
        self.state.read().await.stats_by_origin.len()
    }
}
