//! Generic named-event publish/subscribe primitive.
//!
//! Cells and collections compose an [`Emitter`] by value rather than
//! inheriting notification behavior. Dispatch is synchronous and inline:
//! every handler runs to completion on the caller's thread before `emit`
//! returns.
//!
//! Handlers may subscribe, unsubscribe, or trigger nested emissions from
//! inside a dispatch. `emit` snapshots the handler list first, so an
//! in-flight dispatch is never invalidated by reentrant bookkeeping: a
//! handler removed mid-dispatch still receives the current event, and a
//! handler added mid-dispatch only receives later ones.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Token identifying a registered handler, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// A single-threaded typed event emitter.
///
/// Not `Send`/`Sync` by design: the graph model is single-threaded and
/// handlers hold `Rc` references into it.
pub struct Emitter<E> {
    handlers: RefCell<Vec<(HandlerId, Rc<dyn Fn(&E)>)>>,
    next_id: Cell<u64>,
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Emitter<E> {
    /// Creates an emitter with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Registers a handler and returns its unsubscribe token.
    pub fn on(&self, handler: impl Fn(&E) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Removes a handler. Returns true if it was still registered.
    pub fn off(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(hid, _)| *hid != id);
        handlers.len() != before
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Dispatches an event to all currently registered handlers.
    pub fn emit(&self, event: &E) {
        // Snapshot before dispatch; the borrow must not be held while
        // handlers run, since they may call on/off/emit reentrantly.
        let snapshot: Vec<Rc<dyn Fn(&E)>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(event);
        }
    }
}

impl<E> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("handlers", &self.handler_count())
            .finish()
    }
}
