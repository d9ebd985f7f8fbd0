//! The graph entity: a node or an edge.
//!
//! `Cell` is a shared handle (`Rc`-backed). Cloning it clones the handle;
//! the id, property store, and event surface are shared by all holders.
//! Collections hold these handles for membership but never own the entity:
//! disposal is the cell's own operation, and collections react to it.

use crate::{CellEvent, ModelError, ModelResult, SetOptions, Store, Terminal};
use cellstack_types::{CellId, Emitter, HandlerId};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A uniquely identified graph entity with a mutable property store.
#[derive(Clone)]
pub struct Cell {
    inner: Rc<Inner>,
}

struct Inner {
    id: CellId,
    store: RefCell<Store>,
    emitter: Emitter<CellEvent>,
    kind: Kind,
    disposed: RefCell<bool>,
}

enum Kind {
    Node,
    Edge {
        source: RefCell<Option<Terminal>>,
        target: RefCell<Option<Terminal>>,
    },
}

impl Cell {
    /// Creates a node cell.
    #[must_use]
    pub fn node(id: impl Into<CellId>, data: Value) -> Self {
        Self::build(id.into(), data, Kind::Node)
    }

    /// Creates an edge cell with both terminals unset.
    #[must_use]
    pub fn edge(id: impl Into<CellId>, data: Value) -> Self {
        Self::build(
            id.into(),
            data,
            Kind::Edge {
                source: RefCell::new(None),
                target: RefCell::new(None),
            },
        )
    }

    fn build(id: CellId, data: Value, kind: Kind) -> Self {
        Self {
            inner: Rc::new(Inner {
                id,
                store: RefCell::new(Store::new(data)),
                emitter: Emitter::new(),
                kind,
                disposed: RefCell::new(false),
            }),
        }
    }

    /// Builds a cell from its JSON representation (inverse of [`to_json`]).
    ///
    /// `id` defaults to a generated one, `shape` defaults to `"node"`.
    ///
    /// [`to_json`]: Cell::to_json
    pub fn from_json(value: Value) -> ModelResult<Self> {
        let Value::Object(mut map) = value else {
            return Err(ModelError::NotAnObject);
        };
        let id = match map.remove("id") {
            Some(Value::String(s)) => CellId::from(s),
            Some(other) => CellId::from(other.to_string()),
            None => CellId::new(),
        };
        let shape = match map.remove("shape") {
            Some(Value::String(s)) => s,
            _ => "node".to_owned(),
        };
        match shape.as_str() {
            "node" => Ok(Self::node(id, Value::Object(map))),
            "edge" => {
                let source = take_terminal(&mut map, "source")?;
                let target = take_terminal(&mut map, "target")?;
                let edge = Self::edge(id, Value::Object(map));
                edge.set_source(source, SetOptions::silent());
                edge.set_target(target, SetOptions::silent());
                Ok(edge)
            }
            other => Err(ModelError::UnknownShape(other.to_owned())),
        }
    }

    /// Parses a cell from JSON text (see [`from_json`](Cell::from_json)).
    pub fn from_json_str(s: &str) -> ModelResult<Self> {
        Self::from_json(serde_json::from_str(s)?)
    }

    // ── identity ──────────────────────────────────────────────────

    /// The cell's stable id.
    #[must_use]
    pub fn id(&self) -> &CellId {
        &self.inner.id
    }

    /// True iff `other` is the same entity (handle identity, not id).
    #[must_use]
    pub fn same(&self, other: &Cell) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// True for edge cells.
    #[must_use]
    pub fn is_edge(&self) -> bool {
        matches!(self.inner.kind, Kind::Edge { .. })
    }

    /// True for node cells.
    #[must_use]
    pub fn is_node(&self) -> bool {
        !self.is_edge()
    }

    // ── event surface ─────────────────────────────────────────────

    /// Subscribes to this cell's change events.
    pub fn on(&self, handler: impl Fn(&CellEvent) + 'static) -> HandlerId {
        self.inner.emitter.on(handler)
    }

    /// Detaches a subscription installed via [`on`](Cell::on).
    pub fn off(&self, id: HandlerId) -> bool {
        self.inner.emitter.off(id)
    }

    // ── property store ────────────────────────────────────────────

    /// A snapshot of the whole property document.
    #[must_use]
    pub fn data(&self) -> Value {
        self.inner.store.borrow().data().clone()
    }

    /// Reads the property at `path` (JSON pointer or slash-free shorthand).
    #[must_use]
    pub fn prop(&self, path: &str) -> Option<Value> {
        self.inner.store.borrow().get(path).cloned()
    }

    /// Writes the property at `path`, emitting `Changed` unless silent.
    pub fn set_prop(&self, path: &str, value: Value, options: SetOptions) {
        self.inner.store.borrow_mut().set(path, value);
        if !options.silent {
            self.emit(&CellEvent::Changed { options });
        }
    }

    /// Removes the property at `path`, emitting `Changed` unless silent.
    pub fn remove_prop(&self, path: &str, options: SetOptions) -> Option<Value> {
        let removed = self.inner.store.borrow_mut().remove(path);
        if removed.is_some() && !options.silent {
            self.emit(&CellEvent::Changed { options });
        }
        removed
    }

    /// Overwrites the whole property document (the merge-on-add path),
    /// emitting `Changed` unless silent.
    pub fn replace_data(&self, data: Value, options: SetOptions) {
        self.inner.store.borrow_mut().replace(data);
        if !options.silent {
            self.emit(&CellEvent::Changed { options });
        }
    }

    /// True iff the last store mutation changed the value at `path`.
    #[must_use]
    pub fn has_changed(&self, path: &str) -> bool {
        self.inner.store.borrow().has_changed(path)
    }

    // ── stacking order ────────────────────────────────────────────

    /// The cell's stacking order value (`/zIndex` in the store, default 0).
    #[must_use]
    pub fn z_index(&self) -> f64 {
        self.inner
            .store
            .borrow()
            .get("zIndex")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Updates the stacking order, emitting `ZIndexChanged` then `Changed`
    /// unless silent.
    pub fn set_z_index(&self, z: f64, options: SetOptions) {
        let previous = self.z_index();
        self.inner.store.borrow_mut().set("zIndex", Value::from(z));
        if !options.silent {
            self.emit(&CellEvent::ZIndexChanged {
                current: z,
                previous,
                options,
            });
            self.emit(&CellEvent::Changed { options });
        }
    }

    // ── edge terminals ────────────────────────────────────────────

    /// The source terminal. `None` for nodes and unset edges.
    #[must_use]
    pub fn source(&self) -> Option<Terminal> {
        match &self.inner.kind {
            Kind::Edge { source, .. } => source.borrow().clone(),
            Kind::Node => None,
        }
    }

    /// The target terminal. `None` for nodes and unset edges.
    #[must_use]
    pub fn target(&self) -> Option<Terminal> {
        match &self.inner.kind {
            Kind::Edge { target, .. } => target.borrow().clone(),
            Kind::Node => None,
        }
    }

    /// Rewrites the source terminal, emitting `SourceChanged` then
    /// `Changed` unless silent. No-op (returns false) on nodes.
    pub fn set_source(&self, terminal: Option<Terminal>, options: SetOptions) -> bool {
        let Kind::Edge { source, .. } = &self.inner.kind else {
            return false;
        };
        let previous = source.replace(terminal.clone());
        if !options.silent {
            self.emit(&CellEvent::SourceChanged {
                current: terminal,
                previous,
                options,
            });
            self.emit(&CellEvent::Changed { options });
        }
        true
    }

    /// Rewrites the target terminal, emitting `TargetChanged` then
    /// `Changed` unless silent. No-op (returns false) on nodes.
    pub fn set_target(&self, terminal: Option<Terminal>, options: SetOptions) -> bool {
        let Kind::Edge { target, .. } = &self.inner.kind else {
            return false;
        };
        let previous = target.replace(terminal.clone());
        if !options.silent {
            self.emit(&CellEvent::TargetChanged {
                current: terminal,
                previous,
                options,
            });
            self.emit(&CellEvent::Changed { options });
        }
        true
    }

    // ── lifecycle ─────────────────────────────────────────────────

    /// Marks the cell disposed and emits `Disposed`. Idempotent; the store
    /// is left intact for remaining holders.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        self.emit(&CellEvent::Disposed);
    }

    /// True once [`dispose`](Cell::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        *self.inner.disposed.borrow()
    }

    // ── serialization ─────────────────────────────────────────────

    /// Serializes the cell: the property document plus `id`, `shape`, and
    /// for edges the current terminals.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = match self.data() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        map.insert("id".into(), Value::String(self.id().to_string()));
        let shape = if self.is_edge() { "edge" } else { "node" };
        map.insert("shape".into(), Value::String(shape.into()));
        if self.is_edge() {
            if let Some(terminal) = self.source() {
                map.insert("source".into(), terminal_json(&terminal));
            }
            if let Some(terminal) = self.target() {
                map.insert("target".into(), terminal_json(&terminal));
            }
        }
        Value::Object(map)
    }

    fn emit(&self, event: &CellEvent) {
        self.inner.emitter.emit(event);
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("id", &self.id().as_str())
            .field("shape", if self.is_edge() { &"edge" } else { &"node" })
            .finish()
    }
}

fn take_terminal(map: &mut Map<String, Value>, field: &'static str) -> ModelResult<Option<Terminal>> {
    match map.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| ModelError::InvalidTerminal { field, source }),
    }
}

fn terminal_json(terminal: &Terminal) -> Value {
    serde_json::to_value(terminal).unwrap_or(Value::Null)
}
