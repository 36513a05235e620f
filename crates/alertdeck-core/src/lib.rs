//! Concurrent alert store and live-broadcast machinery for Alertdeck.
//!
//! # Modules
//!
//! - [`aggregate`] -- Folds per-origin statistic sets into aggregate totals
//! - [`store`] -- [`EventStore`]: bounded event buffer, per-origin stats, atomic ingest
//! - [`broadcast`] -- [`Broadcaster`]: bounded per-viewer fan-out of snapshots
//! - [`session`] -- [`ViewerSession`]: pushes snapshots to one live client
//! - [`config`] -- [`StoreConfig`]: retention and queue sizing
//!
//! # Data flow
//!
//! An ingest takes the store's write lock, replaces the outputs list,
//! appends the event (evicting the oldest one at capacity), overwrites the
//! origin's statistic set and recomputes the aggregate. The resulting
//! [`Snapshot`](alertdeck_types::Snapshot) is published to the
//! [`Broadcaster`] before the lock is released, so every viewer observes
//! snapshots in mutation order. Publishing never waits on viewers.

pub mod aggregate;
pub mod broadcast;
pub mod config;
pub mod session;
pub mod store;

pub use aggregate::{TOTAL_LABEL, aggregate};
pub use broadcast::{Broadcaster, Subscription, ViewerId};
pub use config::StoreConfig;
pub use session::{CloseReason, SessionReport, SnapshotTransport, TransportError, ViewerSession};
pub use store::EventStore;
