use lms_cli::commands::{init, inspect, list, verify};
use lms_store::{DocumentStore, JsonFileStore};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_integration_workflow() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("db.json");

    assert!(init::run(&path, false).is_ok());
    assert!(path.exists());

    // Refuses to clobber without --force.
    assert!(init::run(&path, false).is_err());
    assert!(init::run(&path, true).is_ok());

    assert!(inspect::run(&path).is_ok());
    assert!(verify::run(&path).is_ok());
    assert!(list::run(&path, "courses", &[]).is_ok());
}

#[test]
fn test_list_filters() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    init::run(&path, false).unwrap();

    let students = list::select(&path, "users", &["role=student".to_string()]).unwrap();
    assert_eq!(students.len(), 2);

    let active = list::select(&path, "users", &["role=student".to_string(), "status=active".to_string()]).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["email"], "student@example.com");

    assert!(list::select(&path, "users", &["role".to_string()]).is_err());
    assert!(list::select(&path, "nothing", &[]).unwrap().is_empty());
}

#[test]
fn test_verify_flags_duplicate_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    init::run(&path, false).unwrap();

    let store = JsonFileStore::new(&path);
    let mut doc = store.load().unwrap();
    doc.collection_mut("courses")
        .unwrap()
        .push(json!({ "id": 3, "title": "Duplicate" }));
    store.save(&doc).unwrap();

    let summary = inspect::summarize(&doc);
    let courses = summary.iter().find(|s| s.name == "courses").unwrap();
    assert_eq!(courses.duplicate_ids, vec![3]);
    assert_eq!(courses.max_id, Some(3));
    assert_eq!(courses.records, 4);

    assert!(verify::run(&path).is_err());
}

#[test]
fn test_verify_rejects_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "{ \"users\": [").unwrap();

    assert!(verify::run(&path).is_err());
    assert!(inspect::run(&path).is_err());
}
