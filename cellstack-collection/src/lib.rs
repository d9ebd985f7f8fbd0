//! Ordered cell collection with change notifications.
//!
//! [`Collection`] is the membership layer of the graph model: an ordered,
//! uniquely-keyed container of [`Cell`]s that keeps an id index in exact
//! bijection with the sequence, subscribes to each member's own change
//! events, and republishes a precise stream of collection-level events
//! ([`CollectionEvent`]) for a rendering layer to consume.
//!
//! Execution is single-threaded and synchronous: every mutation runs to
//! completion, including all event dispatch, before returning. Handlers may
//! mutate the collection reentrantly; they observe the already-updated
//! state, and the outer operation's remaining events still fire.
//!
//! The collection owns membership, never cell lifetime — cells are shared
//! handles that may live in several collections at once. A member cell's
//! own disposal cascades into removal here.
//!
//! [`Cell`]: cellstack_model::Cell

mod collection;
mod comparator;
mod events;
mod options;

pub use collection::Collection;
pub use comparator::Comparator;
pub use events::{BatchOptions, CollectionEvent, TerminalType};
pub use options::{AddOptions, CollectionOptions, RemoveOptions, ResetOptions};
