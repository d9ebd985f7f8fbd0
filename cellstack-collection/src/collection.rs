//! The ordered, uniquely-keyed cell container.
//!
//! Internal state lives behind `Rc<RefCell<..>>` so the handlers installed
//! on member cells (cascading disposal, zIndex re-sorts, terminal
//! republication) can reach back into the collection through `Weak`
//! references without keeping it alive.
//!
//! Borrow discipline: the state borrow is always released before any event
//! is emitted. Handlers therefore observe fully updated state and may
//! mutate the collection reentrantly; the outer operation's remaining
//! events still fire and describe the outer mutation.

use crate::{
    AddOptions, BatchOptions, CollectionEvent, CollectionOptions, Comparator, RemoveOptions,
    ResetOptions, TerminalType,
};
use cellstack_model::{Cell, CellEvent, SetOptions, Terminal};
use cellstack_types::{CellId, Emitter, HandlerId};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// An ordered collection of cells with unique membership and change
/// notifications.
pub struct Collection {
    state: Rc<RefCell<State>>,
    emitter: Rc<Emitter<CollectionEvent>>,
}

struct State {
    /// Ordered sequence; insertion order or comparator order.
    cells: Vec<Cell>,
    /// id → member, always in exact bijection with `cells`.
    map: HashMap<CellId, Cell>,
    comparator: Option<Comparator>,
    /// Per-member handler installed on the cell's own emitter.
    subscriptions: HashMap<CellId, HandlerId>,
}

impl Collection {
    /// Creates a collection over the initial cells (inserted silently,
    /// no events fire).
    #[must_use]
    pub fn new(cells: impl IntoIterator<Item = Cell>, options: CollectionOptions) -> Self {
        let collection = Self {
            state: Rc::new(RefCell::new(State {
                cells: Vec::new(),
                map: HashMap::new(),
                comparator: options.comparator,
                subscriptions: HashMap::new(),
            })),
            emitter: Rc::new(Emitter::new()),
        };
        add_cells(
            &collection.state,
            &collection.emitter,
            cells.into_iter().collect(),
            AddOptions::silent(),
        );
        collection
    }

    // ── event surface ─────────────────────────────────────────────

    /// Subscribes to this collection's events.
    pub fn on(&self, handler: impl Fn(&CollectionEvent) + 'static) -> HandlerId {
        self.emitter.on(handler)
    }

    /// Detaches a subscription installed via [`on`](Collection::on).
    pub fn off(&self, id: HandlerId) -> bool {
        self.emitter.off(id)
    }

    // ── membership ────────────────────────────────────────────────

    /// Adds cells, skipping ids already present (or merging their data when
    /// `options.merge` is set). See [`AddOptions`] for index resolution and
    /// sorting behavior.
    pub fn add(
        &mut self,
        cells: impl IntoIterator<Item = Cell>,
        options: AddOptions,
    ) -> &mut Self {
        add_cells(
            &self.state,
            &self.emitter,
            cells.into_iter().collect(),
            options,
        );
        self
    }

    /// Appends a cell at the end (explicit index, so no automatic re-sort).
    pub fn push(&mut self, cell: Cell) -> &mut Self {
        let len = self.len() as isize;
        self.add([cell], AddOptions::at(len))
    }

    /// Inserts a cell at the front (explicit index, so no automatic
    /// re-sort).
    pub fn unshift(&mut self, cell: Cell) -> &mut Self {
        self.add([cell], AddOptions::at(0))
    }

    /// Removes a single cell. Returns it, or `None` if it was not a member.
    pub fn remove(&mut self, cell: &Cell, options: RemoveOptions) -> Option<Cell> {
        remove_cells(
            &self.state,
            &self.emitter,
            std::slice::from_ref(cell),
            options,
        )
        .pop()
    }

    /// Removes a batch of cells; absent entries are silently skipped.
    /// Returns the cells actually removed (possibly shorter than the
    /// input).
    pub fn remove_many(&mut self, cells: &[Cell], options: RemoveOptions) -> Vec<Cell> {
        remove_cells(&self.state, &self.emitter, cells, options)
    }

    /// Removes and returns the last cell.
    pub fn pop(&mut self, options: RemoveOptions) -> Option<Cell> {
        let last = self.last()?;
        self.remove(&last, options)
    }

    /// Removes and returns the first cell.
    pub fn shift(&mut self, options: RemoveOptions) -> Option<Cell> {
        let first = self.first()?;
        self.remove(&first, options)
    }

    /// Replaces the whole contents in one externally observable step: one
    /// `Reset` event, no `Add`/`Remove`/`Sort`/`Update`. Callers that need
    /// per-item notifications must use `remove` + `add` instead.
    pub fn reset(&mut self, cells: impl IntoIterator<Item = Cell>, options: ResetOptions) {
        reset_cells(
            &self.state,
            &self.emitter,
            cells.into_iter().collect(),
            options,
        );
    }

    // ── ordering ──────────────────────────────────────────────────

    /// Re-sorts under the configured comparator and emits `Sort`. No-op
    /// without a comparator.
    pub fn sort(&mut self) {
        sort_cells(&self.state, &self.emitter, false);
    }

    /// Re-sorts without emitting `Sort`.
    pub fn sort_silent(&mut self) {
        sort_cells(&self.state, &self.emitter, true);
    }

    /// The configured comparator, if any.
    #[must_use]
    pub fn comparator(&self) -> Option<Comparator> {
        self.state.borrow().comparator.clone()
    }

    // ── lookup & traversal ────────────────────────────────────────

    /// O(1) lookup by id. Never fails for unknown ids.
    #[must_use]
    pub fn get(&self, id: impl AsRef<str>) -> Option<Cell> {
        self.state.borrow().map.get(id.as_ref()).cloned()
    }

    /// True iff a cell with this id is a member.
    #[must_use]
    pub fn has(&self, id: impl AsRef<str>) -> bool {
        self.get(id).is_some()
    }

    /// The cell at `index`; negative indices wrap from the end
    /// (`at(-1)` is the last cell). Out of range, even after wrapping,
    /// yields `None`.
    #[must_use]
    pub fn at(&self, index: isize) -> Option<Cell> {
        let state = self.state.borrow();
        let len = state.cells.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if (0..len).contains(&resolved) {
            state.cells.get(resolved as usize).cloned()
        } else {
            None
        }
    }

    /// The first cell.
    #[must_use]
    pub fn first(&self) -> Option<Cell> {
        self.at(0)
    }

    /// The last cell.
    #[must_use]
    pub fn last(&self) -> Option<Cell> {
        self.at(-1)
    }

    /// The position of a member (handle identity).
    #[must_use]
    pub fn index_of(&self, cell: &Cell) -> Option<usize> {
        self.state.borrow().cells.iter().position(|m| m.same(cell))
    }

    /// Number of member cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().cells.len()
    }

    /// True when the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An independent snapshot of the sequence; mutating it never affects
    /// the collection.
    #[must_use]
    pub fn to_array(&self) -> Vec<Cell> {
        self.state.borrow().cells.clone()
    }

    /// Serializes every member in collection order.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.state.borrow().cells.iter().map(Cell::to_json).collect())
    }
}

/// Cloning copies membership (same cell instances, new container) and the
/// comparator, but installs no subscriptions of its own: wiring appears
/// only once cells pass through the clone's own add path.
impl Clone for Collection {
    fn clone(&self) -> Self {
        let state = self.state.borrow();
        Self {
            state: Rc::new(RefCell::new(State {
                cells: state.cells.clone(),
                map: state.map.clone(),
                comparator: state.comparator.clone(),
                subscriptions: HashMap::new(),
            })),
            emitter: Rc::new(Emitter::new()),
        }
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Collection")
            .field("len", &state.cells.len())
            .field("comparator", &state.comparator)
            .finish()
    }
}

// ── core mutation paths ───────────────────────────────────────────
//
// Free functions over the shared state so the handlers installed on member
// cells can run the same paths the public methods do.

fn add_cells(
    state: &Rc<RefCell<State>>,
    emitter: &Rc<Emitter<CollectionEvent>>,
    input: Vec<Cell>,
    options: AddOptions,
) {
    let explicit_index = options.index.is_some();
    let comparator = state.borrow().comparator.clone();

    // Partition on id. Duplicate ids within one batch collapse to the
    // first occurrence.
    let mut to_add: Vec<Cell> = Vec::new();
    let mut to_merge: Vec<(Cell, Cell)> = Vec::new();
    {
        let st = state.borrow();
        let mut queued: HashSet<CellId> = HashSet::new();
        for cell in input {
            if let Some(existing) = st.map.get(cell.id().as_str()) {
                if options.merge && !existing.same(&cell) {
                    to_merge.push((existing.clone(), cell));
                }
            } else if queued.insert(cell.id().clone()) {
                to_add.push(cell);
            }
        }
    }

    // Merges run with the borrow released: replacing a member's store
    // emits its Changed event, which re-enters this collection's handler.
    let mut merged: Vec<Cell> = Vec::new();
    let mut merge_changed_key = false;
    for (existing, incoming) in to_merge {
        existing.replace_data(
            incoming.data(),
            SetOptions {
                silent: options.silent,
            },
        );
        if comparator
            .as_ref()
            .is_some_and(|c| c.key_changed(&existing))
        {
            merge_changed_key = true;
        }
        merged.push(existing);
    }

    // Splice the queued cells in, preserving their input order.
    {
        let mut st = state.borrow_mut();
        // A reentrant merge handler may have inserted one of these already.
        to_add.retain(|cell| !st.map.contains_key(cell.id().as_str()));
        let index = resolve_add_index(st.cells.len(), options.index);
        for (offset, cell) in to_add.iter().enumerate() {
            st.cells.insert(index + offset, cell.clone());
            st.map.insert(cell.id().clone(), cell.clone());
        }
    }
    for cell in &to_add {
        reference(state, emitter, cell);
    }

    let inserted = !to_add.is_empty();
    let should_sort = comparator.is_some()
        && ((inserted && !explicit_index && options.sort) || merge_changed_key);
    if should_sort {
        // Reorder now; the Sort event fires in sequence below.
        sort_cells(state, emitter, true);
    }

    if options.silent {
        return;
    }
    if inserted || !merged.is_empty() {
        debug!(
            "collection add: {} inserted, {} merged",
            to_add.len(),
            merged.len()
        );
    }

    // Resolved (post-sort) positions, snapshotted before dispatch so a
    // reentrant handler cannot skew later events of this batch.
    let positions: Vec<Option<usize>> = {
        let st = state.borrow();
        to_add
            .iter()
            .map(|cell| st.cells.iter().position(|m| m.same(cell)))
            .collect()
    };
    for (cell, position) in to_add.iter().zip(positions) {
        let Some(index) = position else { continue };
        emitter.emit(&CollectionEvent::Add {
            cell: cell.clone(),
            index,
            options: options.clone(),
        });
    }
    if should_sort {
        emitter.emit(&CollectionEvent::Sort);
    }
    if inserted || !merged.is_empty() {
        emitter.emit(&CollectionEvent::Update {
            added: to_add,
            merged,
            removed: Vec::new(),
            options: BatchOptions::Add(options),
        });
    }
}

fn remove_cells(
    state: &Rc<RefCell<State>>,
    emitter: &Rc<Emitter<CollectionEvent>>,
    targets: &[Cell],
    options: RemoveOptions,
) -> Vec<Cell> {
    let mut removed: Vec<Cell> = Vec::new();
    for target in targets {
        let member = state.borrow().map.get(target.id().as_str()).cloned();
        let Some(cell) = member else { continue };
        let index = {
            let mut st = state.borrow_mut();
            match st.cells.iter().position(|m| m.same(&cell)) {
                Some(index) => {
                    st.cells.remove(index);
                    st.map.remove(cell.id().as_str());
                    index
                }
                None => continue,
            }
        };
        unreference(state, &cell);
        if !options.silent {
            emitter.emit(&CollectionEvent::Remove {
                cell: cell.clone(),
                index,
                options: options.clone(),
            });
        }
        removed.push(cell);
    }
    if !removed.is_empty() {
        debug!("collection remove: {} cell(s)", removed.len());
        if !options.silent {
            emitter.emit(&CollectionEvent::Update {
                added: Vec::new(),
                merged: Vec::new(),
                removed: removed.clone(),
                options: BatchOptions::Remove(options),
            });
        }
    }
    removed
}

fn reset_cells(
    state: &Rc<RefCell<State>>,
    emitter: &Rc<Emitter<CollectionEvent>>,
    cells: Vec<Cell>,
    options: ResetOptions,
) {
    let previous = state.borrow().cells.clone();
    for cell in &previous {
        unreference(state, cell);
    }
    {
        let mut st = state.borrow_mut();
        st.cells.clear();
        st.map.clear();
    }
    add_cells(state, emitter, cells, AddOptions::silent());
    let current = state.borrow().cells.clone();
    debug!(
        "collection reset: {} -> {} cell(s)",
        previous.len(),
        current.len()
    );
    if !options.silent {
        emitter.emit(&CollectionEvent::Reset {
            previous,
            current,
            options,
        });
    }
}

fn sort_cells(state: &Rc<RefCell<State>>, emitter: &Rc<Emitter<CollectionEvent>>, silent: bool) {
    let comparator = state.borrow().comparator.clone();
    let Some(comparator) = comparator else { return };
    // Vec::sort_by is stable: equal keys keep their pre-sort relative
    // order, so repeated incremental re-sorts never jitter unrelated ties.
    // Function comparators run under the state borrow and must not reach
    // back into the collection.
    state
        .borrow_mut()
        .cells
        .sort_by(|a, b| comparator.compare(a, b));
    if !silent {
        emitter.emit(&CollectionEvent::Sort);
    }
}

fn resolve_add_index(len: usize, index: Option<isize>) -> usize {
    let len = len as isize;
    let resolved = match index {
        None => len,
        // -1 inserts before the last element (array splice semantics,
        // not append).
        Some(i) if i < 0 => len + i,
        Some(i) => i,
    };
    resolved.clamp(0, len) as usize
}

// ── member subscription wiring ────────────────────────────────────
//
// Referencing installs exactly one handler set per member; unreferencing
// always detaches it. The two are only ever called from the mutation paths
// above, keeping acquisition paired with membership.

fn reference(state: &Rc<RefCell<State>>, emitter: &Rc<Emitter<CollectionEvent>>, cell: &Cell) {
    if state
        .borrow()
        .subscriptions
        .contains_key(cell.id().as_str())
    {
        return;
    }
    let weak_state = Rc::downgrade(state);
    let weak_emitter = Rc::downgrade(emitter);
    let id = cell.id().clone();
    let handler = cell.on(move |event| {
        let (Some(state), Some(emitter)) = (weak_state.upgrade(), weak_emitter.upgrade()) else {
            return;
        };
        on_cell_event(&state, &emitter, &id, event);
    });
    state
        .borrow_mut()
        .subscriptions
        .insert(cell.id().clone(), handler);
}

fn unreference(state: &Rc<RefCell<State>>, cell: &Cell) {
    let handler = state
        .borrow_mut()
        .subscriptions
        .remove(cell.id().as_str());
    if let Some(handler) = handler {
        cell.off(handler);
    }
}

fn on_cell_event(
    state: &Rc<RefCell<State>>,
    emitter: &Rc<Emitter<CollectionEvent>>,
    id: &CellId,
    event: &CellEvent,
) {
    match event {
        CellEvent::Changed { options } => {
            let member = state.borrow().map.get(id.as_str()).cloned();
            if let Some(cell) = member {
                emitter.emit(&CollectionEvent::Change {
                    cell,
                    options: *options,
                });
            }
        }
        CellEvent::Disposed => {
            let member = state.borrow().map.get(id.as_str()).cloned();
            if let Some(cell) = member {
                debug!("member {id} disposed, removing");
                remove_cells(
                    state,
                    emitter,
                    std::slice::from_ref(&cell),
                    RemoveOptions::default(),
                );
            }
        }
        CellEvent::ZIndexChanged { options, .. } => {
            sort_cells(state, emitter, options.silent);
        }
        CellEvent::SourceChanged { current, previous, .. } => {
            emit_terminal_change(state, emitter, id, TerminalType::Source, current, previous);
        }
        CellEvent::TargetChanged { current, previous, .. } => {
            emit_terminal_change(state, emitter, id, TerminalType::Target, current, previous);
        }
    }
}

fn emit_terminal_change(
    state: &Rc<RefCell<State>>,
    emitter: &Rc<Emitter<CollectionEvent>>,
    id: &CellId,
    terminal_type: TerminalType,
    current: &Option<Terminal>,
    previous: &Option<Terminal>,
) {
    let member = state.borrow().map.get(id.as_str()).cloned();
    let Some(edge) = member else { return };
    emitter.emit(&CollectionEvent::ChangeTerminal {
        terminal_type,
        edge,
        current: current.clone(),
        previous: previous.clone(),
    });
}
