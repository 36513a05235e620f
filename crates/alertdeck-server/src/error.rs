//! Error types for the Alertdeck binary.
//!
//! [`StartupError`] is the top-level error that `main` propagates with `?`.

/// Top-level error for the Alertdeck binary.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A configuration value was missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// The API server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: alertdeck_observer::ServerError,
    },
}
