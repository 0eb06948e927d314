use crate::cli::support::{sitesearch, write_page, write_store};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// Search command tests
// ============================================================================

#[test]
fn test_search_url_renders_fragment() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--url", "https://example.com/search/?query=sleep"])
        .assert()
        .success()
        .stdout(
            "<li><p><a href=\"/posts/cats/\">All about cats</a></p>\
             <p> Cats sleep most of the day....</p></li>\n",
        );
}

#[test]
fn test_search_no_results() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--url", "/search/?query=submarine"])
        .assert()
        .success()
        .stdout("No results found!\n");
}

#[test]
fn test_search_without_query_parameter() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--url", "/search/"])
        .assert()
        .success()
        .stdout("No results found!\n");
}

#[test]
fn test_search_query_flag() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--query", "sourdough"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/posts/bread/"))
        .stdout(predicate::str::contains("/posts/cats/").not());
}

#[test]
fn test_search_json_output() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    let output = sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "search", "--query", "bread"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["state"], "has_results");
    assert_eq!(json["query"], "bread");
    assert_eq!(json["documents"], 3);
    assert_eq!(json["items"][0]["id"], "/posts/bread/");
    assert!(json["html"].as_str().unwrap().starts_with("<li>"));
}

#[test]
fn test_search_json_empty_state() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    let output = sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "search", "--url", "/search/"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["state"], "empty");
    assert_eq!(json["text"], "No results found!");
    assert!(json["query"].is_null());
}

#[test]
fn test_search_updates_page_element() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());
    let page = write_page(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--query", "flour", "--page"])
        .arg(&page)
        .assert()
        .success()
        .stdout("");

    let html = fs::read_to_string(&page).unwrap();
    assert!(html.contains(
        "<ul id=\"result\"><li><p><a href=\"/posts/bread/\">Sourdough bread</a></p>"
    ));
    assert!(!html.contains("placeholder"));
    assert!(html.contains("<footer>site</footer>"));
}

#[test]
fn test_search_page_without_element() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());
    let page = dir.path().join("bare.html");
    fs::write(&page, "<html><body></body></html>").unwrap();

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--query", "cats", "--page"])
        .arg(&page)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("element #result not found"));
}

#[test]
fn test_search_requires_store() {
    let dir = tempdir().unwrap();

    sitesearch()
        .current_dir(dir.path())
        .args(["search", "--query", "cats"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--store"));
}

#[test]
fn test_search_invalid_store() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("broken.js");
    fs::write(&store, "console.log('no store here');").unwrap();

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "search", "--query", "cats"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"invalid_store\""));
}

#[test]
fn test_search_store_from_env() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .env("SITESEARCH_STORE", &store)
        .args(["search", "--query", "dogs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/posts/dogs/"));
}

#[test]
fn test_search_url_and_query_conflict() {
    sitesearch()
        .args(["search", "--url", "/?query=a", "--query", "b"])
        .assert()
        .code(2);
}

#[test]
fn test_search_custom_config() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());
    fs::write(
        dir.path().join("sitesearch.toml"),
        r#"
query_param = "q"
no_results_text = "Nothing found"

[[fields]]
name = "title"
boost = 10.0
"#,
    )
    .unwrap();

    // only titles are indexed
    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--url", "/search/?q=flour"])
        .assert()
        .success()
        .stdout("Nothing found\n");

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "--url", "/search/?q=sourdough"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/posts/bread/"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["--verbose", "search", "--query", "cats"])
        .assert()
        .success()
        .stderr(predicate::str::contains("run_widget"));
}

#[test]
fn test_short_quiet_flag_with_query() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());
    let page = write_page(dir.path());

    sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["search", "-q", "--query", "cats", "--page"])
        .arg(&page)
        .assert()
        .success()
        .stdout("")
        .stderr("");

    assert!(fs::read_to_string(&page).unwrap().contains("/posts/cats/"));
}

#[test]
fn test_title_match_ranks_above_content_match() {
    let dir = tempdir().unwrap();
    let store = write_store(dir.path());

    let output = sitesearch()
        .current_dir(dir.path())
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "search", "--query", "cats"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["items"][0]["id"], "/posts/cats/");
    assert_eq!(json["items"][1]["id"], "/posts/dogs/");
}
