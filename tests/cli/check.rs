use crate::cli::support::{sitesearch, write_store};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_check_reports_counts_and_fields() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 documents indexed"))
        .stdout(predicate::str::contains("title (boost 15)"))
        .stdout(predicate::str::contains("tags <- category (boost 5)"))
        .stdout(predicate::str::contains("All records complete"));
}

#[test]
fn test_check_lists_missing_fields() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.json");
    fs::write(
        &store,
        r#"{"a": {"title": "A", "url": "/a", "content": "x", "category": "c"},
            "b": {"title": "B"}}"#,
    )
    .unwrap();

    let output = sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "check"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["documents"], 2);
    assert_eq!(json["fields"].as_array().unwrap().len(), 3);
    assert_eq!(json["incomplete"][0]["id"], "b");
    assert_eq!(
        json["incomplete"][0]["missing"],
        serde_json::json!(["url", "content", "category"])
    );
}

#[test]
fn test_check_description_preset() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["--preset", "description", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("description (boost 10)"))
        .stdout(predicate::str::contains("3 records with missing fields"));
}
