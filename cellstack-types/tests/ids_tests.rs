use cellstack_types::{CellId, Error};
use pretty_assertions::assert_eq;

// ── CellId ────────────────────────────────────────────────────────

#[test]
fn cell_id_generated_unique() {
    let a = CellId::new();
    let b = CellId::new();
    assert_ne!(a, b);
}

#[test]
fn cell_id_default_unique() {
    let a = CellId::default();
    let b = CellId::default();
    assert_ne!(a, b);
}

#[test]
fn cell_id_from_str_preserved() {
    let id = CellId::from("node-login");
    assert_eq!(id.as_str(), "node-login");
    assert_eq!(id.to_string(), "node-login");
}

#[test]
fn cell_id_from_string_and_str_equal() {
    let a = CellId::from("edge-1");
    let b = CellId::from(String::from("edge-1"));
    assert_eq!(a, b);
}

#[test]
fn cell_id_parse_accepts_generated_ids() {
    let id = CellId::new();
    let parsed = CellId::parse(id.as_str()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn cell_id_parse_rejects_non_uuid_strings() {
    assert!(matches!(
        CellId::parse("node-login"),
        Err(Error::InvalidUuid(_))
    ));
}

#[test]
fn cell_id_serde_roundtrip() {
    let id = CellId::from("a");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#""a""#);
    let parsed: CellId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn cell_id_hash_eq() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(CellId::from("x"));
    set.insert(CellId::from("x"));
    assert_eq!(set.len(), 1);
}
