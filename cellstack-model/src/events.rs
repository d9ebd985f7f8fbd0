//! Change events published by a single cell.

use crate::Terminal;

/// Options accepted by cell mutators.
///
/// `silent` suppresses event emission for the mutation; the options travel
/// inside the emitted events otherwise, so downstream subscribers see what
/// the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetOptions {
    pub silent: bool,
}

impl SetOptions {
    /// Options with `silent: true`.
    #[must_use]
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// Events a cell publishes about itself.
///
/// The emitting cell is implied by the subscription, so payloads carry only
/// the change itself. Terminal events are only ever published by edges.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEvent {
    /// The property store changed (any mutation, including zIndex and
    /// terminal rewrites).
    Changed { options: SetOptions },

    /// The cell was disposed. Fires at most once.
    Disposed,

    /// The stacking order value changed.
    ZIndexChanged {
        current: f64,
        previous: f64,
        options: SetOptions,
    },

    /// The edge's source terminal changed.
    SourceChanged {
        current: Option<Terminal>,
        previous: Option<Terminal>,
        options: SetOptions,
    },

    /// The edge's target terminal changed.
    TargetChanged {
        current: Option<Terminal>,
        previous: Option<Terminal>,
        options: SetOptions,
    },
}
