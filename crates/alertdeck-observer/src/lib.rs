//! API server for the Alertdeck live alert dashboard.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Ingest** (`POST /`) for the upstream collector to submit alerts
//! - **`WebSocket` endpoint** (`/ws`) streaming a fresh snapshot to every
//!   connected dashboard after each ingest
//! - **Read endpoints** for the current snapshot (`/events`), the
//!   dashboard's display settings (`/config`) and liveness (`/healthz`)
//! - **Static dashboard assets** under `/ui` when an asset directory is
//!   configured
//!
//! # Architecture
//!
//! Handlers share one [`EventStore`](alertdeck_core::EventStore) through
//! [`AppState`]. Ingest never waits on viewers: each `WebSocket` runs its
//! own [`ViewerSession`](alertdeck_core::ViewerSession) over a private,
//! bounded subscription, and a viewer that cannot keep up loses its
//! oldest queued snapshots instead of slowing the collector down.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
