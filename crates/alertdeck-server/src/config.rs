//! Configuration for the Alertdeck binary.
//!
//! All configuration is loaded from environment variables. Only the
//! retention and queue sizing reach the store; the rest shapes the HTTP
//! layer.

use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use alertdeck_core::StoreConfig;
use alertdeck_core::config::{DEFAULT_BROADCAST_CAPACITY, DEFAULT_RETENTION};
use alertdeck_types::DisplayMode;

use crate::error::StartupError;

/// Default listen port.
const DEFAULT_PORT: u16 = 2802;

/// Default per-snapshot viewer send timeout in milliseconds.
const DEFAULT_VIEWER_SEND_TIMEOUT_MS: u64 = 10_000;

/// Complete process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to listen on.
    pub address: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Store sizing.
    pub store: StoreConfig,
    /// Theme the dashboard opens with.
    pub display_mode: DisplayMode,
    /// Directory of dashboard assets served under `/ui`.
    pub ui_dir: Option<PathBuf>,
    /// Time allowed for pushing one snapshot to a viewer.
    pub viewer_send_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `ALERTDECK_ADDRESS` -- listen address (default `0.0.0.0`)
    /// - `ALERTDECK_PORT` -- listen port (default `2802`)
    /// - `ALERTDECK_RETENTION` -- events to retain; negative means none (default `200`)
    /// - `ALERTDECK_DARK_MODE` -- open the dashboard in dark mode (default `false`)
    /// - `ALERTDECK_UI_DIR` -- dashboard asset directory (default unset)
    /// - `ALERTDECK_BROADCAST_CAPACITY` -- per-viewer snapshot backlog (default `32`)
    /// - `ALERTDECK_VIEWER_SEND_TIMEOUT_MS` -- viewer send timeout (default `10000`)
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address: IpAddr = parse_or(&lookup, "ALERTDECK_ADDRESS", IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_or(&lookup, "ALERTDECK_PORT", DEFAULT_PORT)?;

        let retention_default = i64::try_from(DEFAULT_RETENTION).unwrap_or(i64::MAX);
        let retention: i64 = parse_or(&lookup, "ALERTDECK_RETENTION", retention_default)?;
        let broadcast_capacity: usize =
            parse_or(&lookup, "ALERTDECK_BROADCAST_CAPACITY", DEFAULT_BROADCAST_CAPACITY)?;
        if broadcast_capacity == 0 {
            return Err(StartupError::Config(String::from(
                "ALERTDECK_BROADCAST_CAPACITY must be at least 1",
            )));
        }

        let dark_mode: bool = parse_or(&lookup, "ALERTDECK_DARK_MODE", false)?;
        let ui_dir = lookup("ALERTDECK_UI_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        let send_timeout_ms: u64 = parse_or(
            &lookup,
            "ALERTDECK_VIEWER_SEND_TIMEOUT_MS",
            DEFAULT_VIEWER_SEND_TIMEOUT_MS,
        )?;

        Ok(Self {
            address,
            port,
            store: StoreConfig::with_signed_retention(retention)
                .broadcast_capacity(broadcast_capacity),
            display_mode: DisplayMode::from_dark_flag(dark_mode),
            ui_dir,
            viewer_send_timeout: Duration::from_millis(send_timeout_ms),
        })
    }
}

/// Parse `key` if set, otherwise fall back to `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, StartupError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: core::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| StartupError::Config(format!("invalid {key}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, StartupError> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.address, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(cfg.port, 2802);
        assert_eq!(cfg.store.retention, 200);
        assert_eq!(cfg.store.broadcast_capacity, 32);
        assert_eq!(cfg.display_mode, DisplayMode::Light);
        assert!(cfg.ui_dir.is_none());
        assert_eq!(cfg.viewer_send_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_every_variable() {
        let cfg = load(&[
            ("ALERTDECK_ADDRESS", "127.0.0.1"),
            ("ALERTDECK_PORT", "8080"),
            ("ALERTDECK_RETENTION", "50"),
            ("ALERTDECK_DARK_MODE", "true"),
            ("ALERTDECK_UI_DIR", "/srv/ui"),
            ("ALERTDECK_BROADCAST_CAPACITY", "16"),
            ("ALERTDECK_VIEWER_SEND_TIMEOUT_MS", "250"),
        ])
        .unwrap();
        assert_eq!(cfg.address, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.store.retention, 50);
        assert_eq!(cfg.store.broadcast_capacity, 16);
        assert_eq!(cfg.display_mode, DisplayMode::Dark);
        assert_eq!(cfg.ui_dir, Some(PathBuf::from("/srv/ui")));
        assert_eq!(cfg.viewer_send_timeout, Duration::from_millis(250));
    }

    #[test]
    fn negative_retention_means_none() {
        let cfg = load(&[("ALERTDECK_RETENTION", "-3")]).unwrap();
        assert_eq!(cfg.store.retention, 0);
    }

    #[test]
    fn rejects_unparseable_address() {
        let err = load(&[("ALERTDECK_ADDRESS", "not-an-ip")]).unwrap_err();
        assert!(err.to_string().contains("ALERTDECK_ADDRESS"));
    }

    #[test]
    fn rejects_zero_broadcast_capacity() {
        assert!(load(&[("ALERTDECK_BROADCAST_CAPACITY", "0")]).is_err());
    }

    #[test]
    fn ipv6_address_is_accepted() {
        let cfg = load(&[("ALERTDECK_ADDRESS", "::")]).unwrap();
        assert!(cfg.address.is_ipv6());
    }
}
