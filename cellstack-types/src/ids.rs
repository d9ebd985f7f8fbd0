//! Identifier types used throughout the CellStack core.
//!
//! Cell ids are strings rather than raw UUIDs: diagram tooling routinely
//! assigns meaningful ids ("node-login", "edge-1") and those must remain
//! first-class. `CellId::new` generates a random UUID v4 string for callers
//! that don't care.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a cell (node or edge) in the graph model.
///
/// Immutable for the cell's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    /// Creates a new random cell ID (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a canonical UUID string into an id.
    ///
    /// This is the validating path for ids that must be generated ones
    /// (e.g. ingested from external tooling); arbitrary caller-assigned
    /// ids go through `From` instead.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(Uuid::parse_str(s)?.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CellId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CellId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for CellId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashMap<CellId, _>` be queried with plain `&str` keys.
impl std::borrow::Borrow<str> for CellId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
