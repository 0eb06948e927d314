use crate::cli::support::sitesearch;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_prints_default_preset() {
    let dir = tempdir().unwrap();

    let output = sitesearch()
        .current_dir(dir.path())
        .arg("config")
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let value: toml::Value = toml::from_str(&text).unwrap();
    assert_eq!(value["query_param"].as_str(), Some("query"));
    assert_eq!(value["result_element"].as_str(), Some("result"));
    assert_eq!(value["fields"].as_array().unwrap().len(), 3);
    assert_eq!(value["snippet"]["max_chars"].as_integer(), Some(150));
}

#[test]
fn test_config_description_preset_json() {
    let dir = tempdir().unwrap();

    let output = sitesearch()
        .current_dir(dir.path())
        .args(["--preset", "description", "--format", "json", "config"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["snippet"]["field"], "description");
    assert_eq!(json["snippet"]["suffix"], "");
    assert_eq!(json["fields"][1]["name"], "description");
}

#[test]
fn test_config_reads_file_in_working_directory() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("sitesearch.toml"),
        "result_element = \"hits\"\n",
    )
    .unwrap();

    sitesearch()
        .current_dir(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("result_element = \"hits\""));
}

#[test]
fn test_invalid_config_is_usage_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "fields = []\n").unwrap();

    sitesearch()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least one field"));
}

#[test]
fn test_unknown_preset_json_error() {
    sitesearch()
        .args(["--format", "json", "--preset", "sidebar", "config"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));
}
