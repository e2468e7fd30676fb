use serde_json::json;
use std::collections::BTreeSet;
use whisker_core::{Criteria, Document, JsonStore, Record, RecordStore, StoreError};

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object record, got {other}"),
    }
}

fn sample_store() -> JsonStore {
    let mut document = Document::new();
    document.insert_table(
        "cats",
        vec![
            record(json!({"id": "a", "owner_id": "p1", "color": "gray"})),
            record(json!({"id": "b", "owner_id": "p2", "color": "gray"})),
            record(json!({"id": "c", "owner_id": "p1", "color": "black"})),
        ],
    );
    document.insert_table("persons", vec![]);
    JsonStore::from_document(document)
}

#[test]
fn select_filters_on_one_field() {
    let store = sample_store();

    let matched = store
        .select("cats", &Criteria::new().with("owner_id", "p1"))
        .unwrap();

    let ids: Vec<_> = matched
        .iter()
        .map(|cat| cat.get("id").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(ids, ["a", "c"]);
}

#[test]
fn select_requires_every_criteria_field_to_match() {
    let store = sample_store();

    // "a" matches owner_id but not color and must be excluded.
    let matched = store
        .select(
            "cats",
            &Criteria::new().with("owner_id", "p1").with("color", "black"),
        )
        .unwrap();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].get("id").unwrap(), "c");
}

#[test]
fn select_with_empty_criteria_returns_all_in_document_order() {
    let store = sample_store();

    let all = store.select("cats", &Criteria::new()).unwrap();

    let ids: Vec<_> = all
        .iter()
        .map(|cat| cat.get("id").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn select_on_unknown_table_is_table_not_found() {
    let store = sample_store();

    let err = store.select("dogs", &Criteria::new()).unwrap_err();
    assert!(matches!(err, StoreError::TableNotFound(table) if table == "dogs"));
}

#[test]
fn select_on_empty_table_returns_no_records() {
    let store = sample_store();

    let matched = store
        .select("persons", &Criteria::new().with("surname", "Keller"))
        .unwrap();
    assert!(matched.is_empty());
}

#[test]
fn select_in_keeps_only_field_values_in_the_set() {
    let store = sample_store();
    let owners: BTreeSet<String> = ["p2".to_string()].into_iter().collect();

    let matched = store.select_in("cats", "owner_id", &owners).unwrap();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].get("id").unwrap(), "b");
}

#[test]
fn select_in_on_absent_field_matches_nothing() {
    let store = sample_store();
    let values: BTreeSet<String> = ["p1".to_string()].into_iter().collect();

    let matched = store.select_in("cats", "microchip", &values).unwrap();
    assert!(matched.is_empty());
}

#[test]
fn select_in_ignores_non_string_field_values() {
    let mut document = Document::new();
    document.insert_table("cats", vec![record(json!({"id": 7, "owner_id": "p1"}))]);
    let store = JsonStore::from_document(document);

    let ids: BTreeSet<String> = ["7".to_string()].into_iter().collect();
    let matched = store.select_by_ids("cats", &ids).unwrap();
    assert!(matched.is_empty());
}

#[test]
fn reload_picks_up_backing_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.json");

    let mut document = Document::new();
    document.insert_table("cats", vec![record(json!({"id": "a", "owner_id": "p1"}))]);
    document.save(&path).unwrap();

    let mut store = JsonStore::open(&path).unwrap();
    assert_eq!(store.select("cats", &Criteria::new()).unwrap().len(), 1);

    document.insert_table(
        "cats",
        vec![
            record(json!({"id": "a", "owner_id": "p1"})),
            record(json!({"id": "b", "owner_id": "p2"})),
        ],
    );
    document.save(&path).unwrap();

    // Cached until reload.
    assert_eq!(store.select("cats", &Criteria::new()).unwrap().len(), 1);
    store.reload().unwrap();
    assert_eq!(store.select("cats", &Criteria::new()).unwrap().len(), 2);
}

#[test]
fn reload_on_in_memory_store_keeps_the_document() {
    let mut store = sample_store();
    store.reload().unwrap();
    assert_eq!(store.select("cats", &Criteria::new()).unwrap().len(), 3);
}

#[test]
fn tables_lists_known_table_names() {
    let store = sample_store();
    assert_eq!(store.tables(), ["cats", "persons"]);
}
