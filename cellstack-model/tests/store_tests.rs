use cellstack_model::Store;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ── get / set ─────────────────────────────────────────────────────

#[test]
fn get_accepts_pointer_and_shorthand() {
    let store = Store::new(json!({"attrs": {"fill": "red"}}));
    assert_eq!(store.get("/attrs/fill"), Some(&json!("red")));
    assert_eq!(store.get("attrs/fill"), Some(&json!("red")));
    assert_eq!(store.get("attrs/stroke"), None);
}

#[test]
fn get_or_falls_back() {
    let store = Store::new(json!({}));
    let default = json!(0);
    assert_eq!(store.get_or("zIndex", &default), &json!(0));
}

#[test]
fn set_overwrites_existing_value() {
    let mut store = Store::new(json!({"zIndex": 1}));
    store.set("zIndex", json!(5));
    assert_eq!(store.get("zIndex"), Some(&json!(5)));
}

#[test]
fn set_creates_intermediate_objects() {
    let mut store = Store::new(json!({}));
    store.set("attrs/body/fill", json!("blue"));
    assert_eq!(store.data(), &json!({"attrs": {"body": {"fill": "blue"}}}));
}

#[test]
fn set_replaces_scalar_intermediate_with_object() {
    let mut store = Store::new(json!({"attrs": 3}));
    store.set("attrs/fill", json!("red"));
    assert_eq!(store.get("attrs/fill"), Some(&json!("red")));
}

#[test]
fn set_empty_path_replaces_document() {
    let mut store = Store::new(json!({"a": 1}));
    store.set("", json!({"b": 2}));
    assert_eq!(store.data(), &json!({"b": 2}));
}

#[test]
fn non_object_document_coerced_to_empty() {
    let store = Store::new(json!(42));
    assert_eq!(store.data(), &json!({}));
}

// ── remove ────────────────────────────────────────────────────────

#[test]
fn remove_deletes_and_returns_value() {
    let mut store = Store::new(json!({"a": {"b": 1}, "c": 2}));
    assert_eq!(store.remove("a/b"), Some(json!(1)));
    assert_eq!(store.data(), &json!({"a": {}, "c": 2}));
}

#[test]
fn remove_missing_path_is_none() {
    let mut store = Store::new(json!({"a": 1}));
    assert_eq!(store.remove("b"), None);
    assert_eq!(store.data(), &json!({"a": 1}));
}

// ── replace ───────────────────────────────────────────────────────

#[test]
fn replace_overwrites_whole_document() {
    let mut store = Store::new(json!({"a": 1}));
    store.replace(json!({"b": 2}));
    assert_eq!(store.data(), &json!({"b": 2}));
}

// ── has_changed ───────────────────────────────────────────────────

#[test]
fn has_changed_reflects_last_mutation_only() {
    let mut store = Store::new(json!({"zIndex": 1, "label": "a"}));
    assert!(!store.has_changed("zIndex"));

    store.set("zIndex", json!(2));
    assert!(store.has_changed("zIndex"));
    assert!(!store.has_changed("label"));

    store.set("label", Value::String("b".into()));
    assert!(store.has_changed("label"));
    assert!(!store.has_changed("zIndex"));
}

#[test]
fn has_changed_after_replace() {
    let mut store = Store::new(json!({"zIndex": 1, "label": "a"}));
    store.replace(json!({"zIndex": 2, "label": "a"}));
    assert!(store.has_changed("zIndex"));
    assert!(!store.has_changed("label"));
}

#[test]
fn set_to_same_value_is_not_a_change() {
    let mut store = Store::new(json!({"zIndex": 1}));
    store.set("zIndex", json!(1));
    assert!(!store.has_changed("zIndex"));
}
