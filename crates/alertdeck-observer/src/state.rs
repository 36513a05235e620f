//! Shared application state for the API server.
//!
//! [`AppState`] holds the one [`EventStore`] every handler and viewer
//! session works against, plus the handful of settings that only the HTTP
//! layer cares about.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alertdeck_core::EventStore;
use alertdeck_core::session::DEFAULT_SEND_TIMEOUT;
use alertdeck_types::UiConfig;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The alert store.
    pub store: Arc<EventStore>,
    /// Display settings served to the dashboard.
    pub ui: UiConfig,
    /// Time allowed for pushing one snapshot to a viewer.
    pub viewer_send_timeout: Duration,
    /// Directory of dashboard assets served under `/ui`, if any.
    pub assets_dir: Option<PathBuf>,
}

impl AppState {
    /// Create application state around a store, with default settings.
    pub const fn new(store: Arc<EventStore>) -> Self {
        Self {
            store,
            ui: UiConfig {
                display_mode: alertdeck_types::DisplayMode::Light,
            },
            viewer_send_timeout: DEFAULT_SEND_TIMEOUT,
            assets_dir: None,
        }
    }

    /// Set the dashboard display settings.
    #[must_use]
    pub const fn with_ui(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    /// Set the per-snapshot viewer send timeout.
    #[must_use]
    pub const fn with_viewer_send_timeout(mut self, timeout: Duration) -> Self {
        self.viewer_send_timeout = timeout;
        self
    }

    /// Serve dashboard assets from `dir` under `/ui`.
    #[must_use]
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }
}
