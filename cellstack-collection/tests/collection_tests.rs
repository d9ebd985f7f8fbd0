use cellstack_collection::{
    AddOptions, Collection, CollectionOptions, Comparator, RemoveOptions,
};
use cellstack_model::Cell;
use pretty_assertions::assert_eq;
use serde_json::json;

fn node(id: &str, z: f64) -> Cell {
    Cell::node(id, json!({ "zIndex": z }))
}

fn ids(collection: &Collection) -> Vec<String> {
    collection
        .to_array()
        .iter()
        .map(|c| c.id().to_string())
        .collect()
}

// ── construction ──────────────────────────────────────────────────

#[test]
fn new_inserts_initial_cells_in_order() {
    let collection = Collection::new(
        [node("a", 0.0), node("b", 0.0)],
        CollectionOptions::default(),
    );
    assert_eq!(ids(&collection), vec!["a", "b"]);
    assert_eq!(collection.len(), 2);
}

#[test]
fn new_applies_comparator() {
    let collection = Collection::new(
        [node("a", 2.0), node("b", 1.0)],
        CollectionOptions::sorted_by(Comparator::by_key("zIndex")),
    );
    assert_eq!(ids(&collection), vec!["b", "a"]);
}

// ── add ───────────────────────────────────────────────────────────

#[test]
fn add_appends_by_default() {
    let mut collection = Collection::new([node("a", 0.0)], CollectionOptions::default());
    collection.add([node("b", 0.0)], AddOptions::default());
    assert_eq!(ids(&collection), vec!["a", "b"]);
}

#[test]
fn add_at_explicit_index() {
    let mut collection = Collection::new(
        [node("a", 0.0), node("c", 0.0)],
        CollectionOptions::default(),
    );
    collection.add([node("b", 0.0)], AddOptions::at(1));
    assert_eq!(ids(&collection), vec!["a", "b", "c"]);
}

#[test]
fn add_at_negative_index_inserts_before_last() {
    let mut collection = Collection::new(
        [node("a", 0.0), node("b", 0.0)],
        CollectionOptions::default(),
    );
    collection.add([node("x", 0.0)], AddOptions::at(-1));
    assert_eq!(ids(&collection), vec!["a", "x", "b"]);
}

#[test]
fn add_index_clamped_to_bounds() {
    let mut collection = Collection::new([node("a", 0.0)], CollectionOptions::default());
    collection.add([node("b", 0.0)], AddOptions::at(100));
    collection.add([node("c", 0.0)], AddOptions::at(-100));
    assert_eq!(ids(&collection), vec!["c", "a", "b"]);
}

#[test]
fn add_existing_id_is_noop() {
    let original = node("a", 1.0);
    let mut collection = Collection::new([original.clone()], CollectionOptions::default());

    collection.add([node("a", 9.0)], AddOptions::default());

    assert_eq!(collection.len(), 1);
    // The original instance is retained untouched.
    assert!(collection.get("a").unwrap().same(&original));
    assert_eq!(collection.get("a").unwrap().z_index(), 1.0);
}

#[test]
fn merge_replaces_the_member_document_wholesale() {
    let original = Cell::node("a", json!({ "zIndex": 1.0, "label": "old" }));
    let mut collection = Collection::new([original.clone()], CollectionOptions::default());

    collection.add(
        [Cell::node("a", json!({ "zIndex": 2.0 }))],
        AddOptions::merge(),
    );

    // The incoming document replaces the member's store: top-level keys
    // absent from it do not survive.
    assert_eq!(original.prop("label"), None);
    assert_eq!(original.z_index(), 2.0);
}

#[test]
fn add_batch_preserves_input_order_at_index() {
    let mut collection = Collection::new(
        [node("a", 0.0), node("d", 0.0)],
        CollectionOptions::default(),
    );
    collection.add([node("b", 0.0), node("c", 0.0)], AddOptions::at(1));
    assert_eq!(ids(&collection), vec!["a", "b", "c", "d"]);
}

#[test]
fn duplicate_ids_within_one_batch_collapse() {
    let mut collection = Collection::new([], CollectionOptions::default());
    collection.add([node("a", 1.0), node("a", 2.0)], AddOptions::default());
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get("a").unwrap().z_index(), 1.0);
}

#[test]
fn push_and_unshift_place_at_ends() {
    let mut collection = Collection::new([node("b", 0.0)], CollectionOptions::default());
    collection.push(node("c", 0.0)).unshift(node("a", 0.0));
    assert_eq!(ids(&collection), vec!["a", "b", "c"]);
}

// ── remove ────────────────────────────────────────────────────────

#[test]
fn remove_returns_the_member() {
    let a = node("a", 0.0);
    let mut collection = Collection::new([a.clone(), node("b", 0.0)], CollectionOptions::default());

    let removed = collection.remove(&a, RemoveOptions::default());

    assert!(removed.unwrap().same(&a));
    assert_eq!(ids(&collection), vec!["b"]);
    assert!(!collection.has("a"));
}

#[test]
fn remove_absent_returns_none() {
    let mut collection = Collection::new([node("a", 0.0)], CollectionOptions::default());
    let stranger = node("x", 0.0);
    assert!(collection.remove(&stranger, RemoveOptions::default()).is_none());
    assert_eq!(collection.len(), 1);
}

#[test]
fn remove_many_skips_absent_entries() {
    let a = node("a", 0.0);
    let b = node("b", 0.0);
    let stranger = node("x", 0.0);
    let mut collection = Collection::new([a.clone(), b.clone()], CollectionOptions::default());

    let removed = collection.remove_many(
        &[a.clone(), stranger, b.clone()],
        RemoveOptions::default(),
    );

    assert_eq!(removed.len(), 2);
    assert!(collection.is_empty());
}

#[test]
fn pop_and_shift_take_the_ends() {
    let mut collection = Collection::new(
        [node("a", 0.0), node("b", 0.0), node("c", 0.0)],
        CollectionOptions::default(),
    );
    assert_eq!(collection.pop(RemoveOptions::default()).unwrap().id().as_str(), "c");
    assert_eq!(collection.shift(RemoveOptions::default()).unwrap().id().as_str(), "a");
    assert_eq!(ids(&collection), vec!["b"]);
}

#[test]
fn pop_on_empty_returns_none() {
    let mut collection = Collection::new([], CollectionOptions::default());
    assert!(collection.pop(RemoveOptions::default()).is_none());
    assert!(collection.shift(RemoveOptions::default()).is_none());
}

// ── lookup & traversal ────────────────────────────────────────────

#[test]
fn get_is_by_id_and_never_fails() {
    let a = node("a", 0.0);
    let collection = Collection::new([a.clone()], CollectionOptions::default());
    assert!(collection.get("a").unwrap().same(&a));
    assert!(collection.get(a.id()).unwrap().same(&a));
    assert!(collection.get("missing").is_none());
    assert!(collection.has("a"));
    assert!(!collection.has("missing"));
}

#[test]
fn at_wraps_negative_indices() {
    let collection = Collection::new(
        [node("a", 0.0), node("b", 0.0), node("c", 0.0)],
        CollectionOptions::default(),
    );
    assert_eq!(collection.at(0).unwrap().id().as_str(), "a");
    assert_eq!(collection.at(-1).unwrap().id().as_str(), "c");
    assert_eq!(collection.at(-3).unwrap().id().as_str(), "a");
    assert!(collection.at(3).is_none());
    assert!(collection.at(-4).is_none());
}

#[test]
fn first_and_last_match_at() {
    let collection = Collection::new(
        [node("a", 0.0), node("b", 0.0)],
        CollectionOptions::default(),
    );
    assert!(collection.first().unwrap().same(&collection.at(0).unwrap()));
    assert!(collection.last().unwrap().same(&collection.at(-1).unwrap()));
}

#[test]
fn to_array_is_an_independent_snapshot() {
    let collection = Collection::new([node("a", 0.0)], CollectionOptions::default());
    let mut snapshot = collection.to_array();
    snapshot.push(node("b", 0.0));
    snapshot.clear();
    assert_eq!(collection.len(), 1);
}

#[test]
fn to_json_preserves_collection_order() {
    let collection = Collection::new(
        [node("a", 2.0), node("b", 1.0)],
        CollectionOptions::sorted_by(Comparator::by_key("zIndex")),
    );
    let json = collection.to_json();
    assert_eq!(
        json,
        json!([
            {"id": "b", "shape": "node", "zIndex": 1.0},
            {"id": "a", "shape": "node", "zIndex": 2.0},
        ])
    );
}

// ── clone ─────────────────────────────────────────────────────────

#[test]
fn clone_copies_membership_not_cells() {
    let a = node("a", 0.0);
    let collection = Collection::new([a.clone()], CollectionOptions::default());
    let cloned = collection.clone();

    assert_eq!(cloned.len(), 1);
    assert!(cloned.get("a").unwrap().same(&a));
}

#[test]
fn clone_keeps_the_comparator() {
    let collection = Collection::new(
        [node("a", 2.0)],
        CollectionOptions::sorted_by(Comparator::by_key("zIndex")),
    );
    let mut cloned = collection.clone();
    cloned.add([node("b", 1.0)], AddOptions::default());
    assert_eq!(ids(&cloned), vec!["b", "a"]);
}

#[test]
fn clone_installs_no_subscriptions() {
    let a = node("a", 0.0);
    let collection = Collection::new([a.clone()], CollectionOptions::default());
    let cloned = collection.clone();

    a.dispose();

    // The original reacts to disposal; the clone never wired up.
    assert!(collection.is_empty());
    assert_eq!(cloned.len(), 1);
}
