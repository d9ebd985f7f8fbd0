//! Collection-level change notifications.
//!
//! The event stream a rendering layer consumes. Payloads carry the options
//! of the triggering call, so subscribers can distinguish e.g. a removal
//! requested with `disconnect_edges` from a plain one.

use crate::{AddOptions, RemoveOptions, ResetOptions};
use cellstack_model::{Cell, SetOptions, Terminal};

/// Which end of an edge a terminal change concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalType {
    Source,
    Target,
}

/// The options of the batch that produced an `Update` summary.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOptions {
    Add(AddOptions),
    Remove(RemoveOptions),
}

/// Events a collection publishes about its membership and members.
#[derive(Debug, Clone)]
pub enum CollectionEvent {
    /// A cell entered the collection, one event per inserted cell, carrying
    /// its resolved (post-sort) position.
    Add {
        cell: Cell,
        index: usize,
        options: AddOptions,
    },

    /// A cell left the collection; `index` is its position before removal.
    Remove {
        cell: Cell,
        index: usize,
        options: RemoveOptions,
    },

    /// A member cell's own `Changed` event, republished verbatim.
    Change { cell: Cell, options: SetOptions },

    /// The order changed via the comparator.
    Sort,

    /// Bulk replace: the only path that swaps the whole contents in a
    /// single externally observable step.
    Reset {
        previous: Vec<Cell>,
        current: Vec<Cell>,
        options: ResetOptions,
    },

    /// Aggregate summary after an add/remove batch. `added` preserves the
    /// input order of the batch, not the post-sort order.
    Update {
        added: Vec<Cell>,
        merged: Vec<Cell>,
        removed: Vec<Cell>,
        options: BatchOptions,
    },

    /// A member edge's source or target terminal changed.
    ChangeTerminal {
        terminal_type: TerminalType,
        edge: Cell,
        current: Option<Terminal>,
        previous: Option<Terminal>,
    },
}
