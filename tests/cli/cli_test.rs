//! CLI tests for the ogq subcommands.

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use super::common::run_ogq;
use crate::integration::common::MockServer;

#[test]
fn test_save_then_read() {
    let dir = tempdir().unwrap();
    let response = json!({
        "title": "ignored",
        "headers": ["column1", "column2"],
        "result": [["x", "y"], ["a", "b"]]
    });
    std::fs::write(dir.path().join("response.json"), response.to_string()).unwrap();

    let (code, _, stderr) = run_ogq(
        dir.path(),
        &["save", "response.json", "results", "--query", "SELECT * FROM t"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("results.csv")).unwrap(),
        "column1,column2\nx,y\na,b\n"
    );

    let (code, stdout, stderr) = run_ogq(dir.path(), &["read", "results"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let printed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        printed,
        json!({
            "headers": ["column1", "column2"],
            "result": [["x", "y"], ["a", "b"]],
            "query": "SELECT * FROM t"
        })
    );
}

#[test]
fn test_save_rejects_response_without_headers() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("response.json"), r#"{"result": []}"#).unwrap();

    let (code, _, stderr) = run_ogq(dir.path(), &["save", "response.json", "results"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid Argument"), "stderr: {stderr}");
    assert!(!dir.path().join("results.csv").exists());
}

#[test]
fn test_read_missing_file_fails() {
    let dir = tempdir().unwrap();

    let (code, stdout, stderr) = run_ogq(dir.path(), &["read", "missing"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Load Error: "), "stderr: {stderr}");
    assert!(
        !stderr.contains("Failed to load query results"),
        "category printed twice: {stderr}"
    );
}

#[test]
fn test_run_without_instance_is_config_error() {
    let dir = tempdir().unwrap();

    let (code, _, stderr) = run_ogq(dir.path(), &["run", "SELECT 1"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Configuration Error"), "stderr: {stderr}");
}

#[test]
fn test_unknown_named_instance_is_config_error() {
    let dir = tempdir().unwrap();

    let (code, _, stderr) = run_ogq(dir.path(), &["-i", "prod", "run", "SELECT 1"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("'prod' not found"), "stderr: {stderr}");
}

#[test]
fn test_run_and_save_with_flags() {
    let server = MockServer::respond_with(
        200,
        json!({"title": "t", "headers": ["n"], "result": [[1], [2]]}).to_string(),
    );
    let dir = tempdir().unwrap();
    let url = server.url();

    let (code, _, stderr) = run_ogq(
        dir.path(),
        &["--url", &url, "--api-key", "k", "run-and-save", "SELECT n", "out"],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out.csv")).unwrap(),
        "n\n1\n2\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out.query")).unwrap(),
        "SELECT n"
    );
    assert_eq!(
        server.captured().headers.get("authorization").map(String::as_str),
        Some("Bearer k")
    );
}

#[test]
fn test_run_with_named_instance_prints_json() {
    let server = MockServer::respond_with(
        200,
        json!({"headers": ["n"], "result": [[1]]}).to_string(),
    );
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "[instances.staging]\nurl = \"{}\"\napi_key = \"from-config\"\n",
            server.url()
        ),
    )
    .unwrap();

    let (code, stdout, stderr) = run_ogq(dir.path(), &["-i", "staging", "run", "SELECT n"]);

    assert_eq!(code, 0, "stderr: {stderr}");
    let printed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(printed, json!({"headers": ["n"], "result": [[1]]}));
    assert!(!stderr.contains("from-config"));
    assert_eq!(
        server.captured().headers.get("authorization").map(String::as_str),
        Some("Bearer from-config")
    );
}
