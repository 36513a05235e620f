//! Enumeration types for the dashboard configuration.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Colour scheme the dashboard starts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum DisplayMode {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl DisplayMode {
    /// Pick the display mode from a "dark by default" flag.
    pub const fn from_dark_flag(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}
