//! Identifier wrappers.
//!
//! Alert sources identify themselves with an arbitrary string (the
//! collector sends its instance UUID, but nothing here relies on that).
//! Wrapping it keeps origin keys from being mixed up with statistic
//! labels, which are also plain strings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies the upstream source that submitted an event.
///
/// The empty string is a valid (if degenerate) origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct OriginId(pub String);

impl OriginId {
    /// Create an origin identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner [`String`].
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for OriginId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OriginId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for OriginId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = OriginId::new("collector-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"collector-1\"");
        assert_eq!(id.to_string(), "collector-1");
    }

    #[test]
    fn empty_origin_is_default() {
        assert_eq!(OriginId::default(), OriginId::from(""));
        assert!(OriginId::default().as_str().is_empty());
    }
}
