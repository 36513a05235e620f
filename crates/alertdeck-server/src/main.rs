//! Alertdeck binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Create the alert store
//! 4. Serve the API until `Ctrl-C`

mod config;
mod error;

use std::sync::Arc;

use alertdeck_core::EventStore;
use alertdeck_observer::{AppState, ServerConfig};
use alertdeck_types::UiConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::StartupError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("alertdeck starting");

    // 2. Load configuration.
    let config = AppConfig::from_env()?;
    info!(
        address = %config.address,
        port = config.port,
        retention = config.store.retention,
        broadcast_capacity = config.store.broadcast_capacity,
        display_mode = ?config.display_mode,
        ui_dir = ?config.ui_dir,
        "Configuration loaded"
    );

    // 3. Create the store.
    let store = Arc::new(EventStore::new(&config.store));
    let mut state = AppState::new(store)
        .with_ui(UiConfig {
            display_mode: config.display_mode,
        })
        .with_viewer_send_timeout(config.viewer_send_timeout);
    if let Some(dir) = &config.ui_dir {
        state = state.with_assets_dir(dir);
    }

    // 4. Serve.
    let server = ServerConfig {
        host: config.address.to_string(),
        port: config.port,
    };
    alertdeck_observer::start_server(&server, Arc::new(state)).await?;

    info!("alertdeck stopped");
    Ok(())
}
