//! Options accepted by collection mutators.
//!
//! Every mutating operation takes `silent` to suppress its event emissions
//! (programmatic bulk setup). The options travel inside the emitted events
//! otherwise, so subscribers see what the caller asked for.

use crate::Comparator;

/// Configuration for a new [`Collection`](crate::Collection).
#[derive(Debug, Clone, Default)]
pub struct CollectionOptions {
    /// Ordering rule; `None` keeps insertion order.
    pub comparator: Option<Comparator>,
}

impl CollectionOptions {
    /// Options with the given comparator.
    #[must_use]
    pub fn sorted_by(comparator: Comparator) -> Self {
        Self {
            comparator: Some(comparator),
        }
    }
}

/// Options for [`Collection::add`](crate::Collection::add).
#[derive(Debug, Clone, PartialEq)]
pub struct AddOptions {
    /// Insertion position. Negative values count from the end (`-1` inserts
    /// before the last element); out-of-range values are clamped. `None`
    /// appends.
    pub index: Option<isize>,
    /// Overwrite an already-present member's store data instead of treating
    /// the add as a no-op.
    pub merge: bool,
    /// Set to `false` to suppress the automatic re-sort of an append.
    pub sort: bool,
    /// Suppress all event emission.
    pub silent: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            index: None,
            merge: false,
            sort: true,
            silent: false,
        }
    }
}

impl AddOptions {
    /// Options with `silent: true`.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    /// Options inserting at an explicit position.
    #[must_use]
    pub fn at(index: isize) -> Self {
        Self {
            index: Some(index),
            ..Self::default()
        }
    }

    /// Options with `merge: true`.
    #[must_use]
    pub fn merge() -> Self {
        Self {
            merge: true,
            ..Self::default()
        }
    }
}

/// Options for [`Collection::remove`](crate::Collection::remove).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoveOptions {
    /// Suppress all event emission.
    pub silent: bool,
    /// Forwarded verbatim in `Remove`/`Update` payloads so the owning graph
    /// layer can disconnect edges pointing at the removed cells. The
    /// collection itself only manages membership.
    pub disconnect_edges: bool,
}

impl RemoveOptions {
    /// Options with `silent: true`.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }
}

/// Options for [`Collection::reset`](crate::Collection::reset).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResetOptions {
    /// Suppress the `Reset` event.
    pub silent: bool,
}

impl ResetOptions {
    /// Options with `silent: true`.
    #[must_use]
    pub fn silent() -> Self {
        Self { silent: true }
    }
}
