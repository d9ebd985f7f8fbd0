//! Entity layer for CellStack.
//!
//! Defines the graph entities the collection layer manages:
//! - [`Cell`] — a uniquely identified node or edge with a mutable property
//!   store and its own change-event surface
//! - [`Store`] — the JSON-pointer addressed property bag with black-box
//!   change tracking (`has_changed`)
//! - [`Terminal`] — an edge endpoint: a reference to another cell's id or
//!   a free-floating point
//!
//! Cells are shared handles: cloning a [`Cell`] clones the handle, not the
//! entity. A cell may be a member of several collections (or none); it owns
//! its own data and event surface, while collections own only membership.

mod cell;
mod events;
mod store;
mod terminal;

pub use cell::Cell;
pub use events::{CellEvent, SetOptions};
pub use store::Store;
pub use terminal::Terminal;

/// Result type alias using the crate's error type.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors that can occur when building cells from external data.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cell JSON must be an object")]
    NotAnObject,

    #[error("unknown cell shape: {0}")]
    UnknownShape(String),

    #[error("invalid terminal for {field}: {source}")]
    InvalidTerminal {
        field: &'static str,
        source: serde_json::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
