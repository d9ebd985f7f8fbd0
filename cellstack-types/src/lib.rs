//! Core type definitions for CellStack.
//!
//! This crate defines the fundamental, shape-agnostic types used throughout
//! the graph model:
//! - Cell identifiers (caller-supplied strings or generated UUID v4)
//! - The generic event emitter primitive composed by cells and collections
//!
//! All domain-specific types (nodes, edges, property stores, collections)
//! belong in `cellstack-model` and `cellstack-collection`, not here.

mod emitter;
mod ids;

pub use emitter::{Emitter, HandlerId};
pub use ids::CellId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
