//! Wire structs shared by the store, the HTTP surface and the dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::DisplayMode;
use crate::ids::OriginId;

/// Per-label integer counters.
///
/// For a single submission this is that submission's contribution; in a
/// [`Snapshot`] it is the aggregate across all origins plus `"total"`.
/// A [`BTreeMap`] keeps label order stable on the wire.
pub type StatSet = BTreeMap<String, i64>;

/// Body posted by the upstream collector for every alert it forwards.
///
/// All fields may be omitted; missing fields take their empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IngestRequest {
    /// The submitting source. Sent by the collector as `uuid`.
    #[serde(rename = "uuid", default)]
    pub origin: OriginId,
    /// The alert record itself, stored verbatim.
    #[serde(default)]
    pub event: serde_json::Value,
    /// This source's current counters.
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,
    /// Names of the channels alerts are currently routed to.
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// Immutable point-in-time copy of the event store.
///
/// Served by the read endpoint and pushed to every live viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot {
    /// Retained events, oldest first.
    pub events: Vec<serde_json::Value>,
    /// Aggregate counters across all origins, including `"total"`.
    pub stats: BTreeMap<String, i64>,
    /// Most recently reported output channels.
    pub outputs: Vec<String>,
    /// Maximum number of events the store retains.
    pub retention: usize,
}

impl Snapshot {
    /// An empty snapshot for a store with the given retention.
    pub const fn empty(retention: usize) -> Self {
        Self {
            events: Vec::new(),
            stats: BTreeMap::new(),
            outputs: Vec::new(),
            retention,
        }
    }
}

/// Dashboard settings served at `/config`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UiConfig {
    /// Theme the dashboard opens with.
    pub display_mode: DisplayMode,
}
