//! Query API client integration tests.

use og_query_runner::{run_query, ClientConfig, QueryClient, QueryRunnerError, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::common::{refused_url, MockServer};

const RESPONSE: &str = r#"{
    "title": "Accounts",
    "headers": ["id", "name", "active"],
    "result": [[1, "alice", true], [2, null, false]]
}"#;

#[test]
fn test_run_query_sends_expected_request() {
    let server = MockServer::respond_with(200, RESPONSE);

    run_query(&server.url(), "SELECT * FROM accounts", "secret-token").unwrap();

    let request = server.captured();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/main/core/api/v1/query/run");
    assert_eq!(
        request.headers.get("authorization").map(String::as_str),
        Some("Bearer secret-token")
    );
    assert_eq!(
        request.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        body,
        json!({
            "query": "SELECT * FROM accounts",
            "engine": "cloudql",
            "page": {"no": 1, "size": 10000}
        })
    );
}

#[test]
fn test_run_query_strips_title() {
    let server = MockServer::respond_with(200, RESPONSE);

    let result = run_query(&server.url(), "SELECT * FROM accounts", "k").unwrap();

    assert_eq!(result.headers, vec!["id", "name", "active"]);
    assert_eq!(
        result.rows,
        vec![
            vec![Value::Int(1), Value::from("alice"), Value::Bool(true)],
            vec![Value::Int(2), Value::Null, Value::Bool(false)],
        ]
    );
    assert!(result.query.is_none());
    assert!(!serde_json::to_string(&result).unwrap().contains("title"));
}

#[test]
fn test_trailing_slash_on_endpoint() {
    let server = MockServer::respond_with(200, RESPONSE);

    run_query(&format!("{}/", server.url()), "q", "k").unwrap();

    assert_eq!(server.captured().path, "/main/core/api/v1/query/run");
}

#[test]
fn test_server_error_is_query_execution_error() {
    let server = MockServer::respond_with(500, r#"{"message": "engine exploded"}"#);

    let err = run_query(&server.url(), "q", "k").unwrap_err();

    assert!(matches!(err, QueryRunnerError::QueryExecution(_)));
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("engine exploded"));
}

#[test]
fn test_unauthorized_is_query_execution_error() {
    let server = MockServer::respond_with(401, "{}");

    let err = run_query(&server.url(), "q", "bad-key").unwrap_err();
    assert!(matches!(err, QueryRunnerError::QueryExecution(_)));
}

#[test]
fn test_connection_refused_is_query_execution_error() {
    let err = run_query(&refused_url(), "q", "k").unwrap_err();
    assert!(matches!(err, QueryRunnerError::QueryExecution(_)));
}

#[test]
fn test_invalid_json_is_query_execution_error() {
    let server = MockServer::respond_with(200, "<html>not json</html>");

    let err = run_query(&server.url(), "q", "k").unwrap_err();
    assert!(matches!(err, QueryRunnerError::QueryExecution(_)));
}

#[test]
fn test_unexpected_shape_is_query_execution_error() {
    let server = MockServer::respond_with(200, r#"{"rows": []}"#);

    let err = run_query(&server.url(), "q", "k").unwrap_err();
    assert!(matches!(err, QueryRunnerError::QueryExecution(_)));
    assert!(err.to_string().contains("headers"));
}

#[test]
fn test_empty_arguments_make_no_request() {
    let server = MockServer::respond_with(200, RESPONSE);
    let url = server.url();

    for (endpoint, query, credential) in [
        ("", "q", "k"),
        (url.as_str(), "", "k"),
        (url.as_str(), "q", ""),
    ] {
        let err = run_query(endpoint, query, credential).unwrap_err();
        assert!(matches!(err, QueryRunnerError::InvalidArgument(_)));
    }

    assert!(!server.was_called());
}

#[test]
fn test_query_client_with_timeout() {
    let server = MockServer::respond_with(200, RESPONSE);
    let client = QueryClient::new(ClientConfig::new(server.url(), "k").with_timeout(5)).unwrap();

    let result = client.run_query("SELECT 1").unwrap();

    assert_eq!(result.row_count(), 2);
    assert_eq!(client.config().timeout_secs, 5);
}
