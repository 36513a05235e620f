//! Shared type definitions for Alertdeck.
//!
//! Every value that crosses a process boundary lives here: the ingest
//! payload posted by the upstream collector, the snapshot served to
//! dashboards, and the dashboard's display configuration. Types flow to
//! `TypeScript` via `ts-rs` for the dashboard frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Origin identifier newtype
//! - [`enums`] -- Display mode
//! - [`structs`] -- Ingest request, snapshot, statistic sets, UI config

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::DisplayMode;
pub use ids::OriginId;
pub use structs::{IngestRequest, Snapshot, StatSet, UiConfig};

#[cfg(test)]
mod tests {
    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::ids::OriginId::export_all();
        let _ = crate::enums::DisplayMode::export_all();
        let _ = crate::structs::IngestRequest::export_all();
        let _ = crate::structs::Snapshot::export_all();
        let _ = crate::structs::UiConfig::export_all();
    }
}
