//! Query API client.
//!
//! Sends a single query to the `/main/core/api/v1/query/run` endpoint of an
//! instance and returns the first page of results.

use reqwest::blocking::Client;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{QueryRunnerError, Result};
use crate::persistence;
use crate::result::QueryResult;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Path of the query endpoint, relative to the instance URL.
const QUERY_RUN_PATH: &str = "/main/core/api/v1/query/run";

/// Query engine requested from the API.
const ENGINE: &str = "cloudql";

/// Rows requested per query. Only the first page is ever fetched.
pub const PAGE_SIZE: u32 = 10_000;

/// Longest response body quoted in an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Query client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the instance.
    pub endpoint: String,
    /// Bearer token for authentication.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Creates a new config with the given endpoint and API key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

// Keep the API key out of logs and panics.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Blocking client for the query API.
#[derive(Debug, Clone)]
pub struct QueryClient {
    config: ClientConfig,
    client: Client,
}

impl QueryClient {
    /// Creates a new query client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        require_non_empty("endpoint", &config.endpoint)?;
        require_non_empty("credential", &config.api_key)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                QueryRunnerError::query_execution(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `OG_INSTANCE_URL` for the endpoint and `OG_API_KEY` for the key.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("OG_INSTANCE_URL").map_err(|_| {
            QueryRunnerError::invalid_argument("OG_INSTANCE_URL environment variable not set")
        })?;
        let api_key = std::env::var("OG_API_KEY").map_err(|_| {
            QueryRunnerError::invalid_argument("OG_API_KEY environment variable not set")
        })?;

        Self::new(ClientConfig::new(endpoint, api_key))
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the query run URL for the configured instance.
    pub fn query_url(&self) -> String {
        query_url(&self.config.endpoint)
    }

    /// Runs a query and returns the first page of results.
    pub fn run_query(&self, query: &str) -> Result<QueryResult> {
        require_non_empty("query", query)?;

        let url = self.query_url();
        let request = RunQueryRequest {
            query,
            engine: ENGINE,
            page: Page {
                no: 1,
                size: PAGE_SIZE,
            },
        };

        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| {
                warn!("Query request to {} failed: {}", url, e);
                if e.is_timeout() {
                    QueryRunnerError::query_execution(format!("Request to {url} timed out"))
                } else if e.is_connect() {
                    QueryRunnerError::query_execution(format!("Failed to connect to {url}: {e}"))
                } else {
                    QueryRunnerError::query_execution(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            QueryRunnerError::query_execution(format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!("Query API returned {}", status);
            return Err(QueryRunnerError::query_execution(format!(
                "HTTP {}: {}",
                status,
                truncate(&body, MAX_ERROR_BODY_CHARS)
            )));
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            QueryRunnerError::query_execution(format!("Failed to parse response: {e}"))
        })?;

        let result = QueryResult::from_json(value).map_err(|e| {
            QueryRunnerError::query_execution(format!("Unexpected response: {}", e.message()))
        })?;

        debug!(
            "Query returned {} columns, {} rows",
            result.headers.len(),
            result.row_count()
        );

        Ok(result)
    }

    /// Runs a query and saves the result next to a `.query` file holding its text.
    pub fn run_and_save(&self, query: &str, path: impl AsRef<Path>) -> Result<()> {
        let result = self.run_query(query)?;
        persistence::save_query_results(&result, path, Some(query))
    }
}

/// Request body for the query run endpoint.
#[derive(Debug, Serialize)]
struct RunQueryRequest<'a> {
    query: &'a str,
    engine: &'a str,
    page: Page,
}

#[derive(Debug, Serialize)]
struct Page {
    no: u32,
    size: u32,
}

/// Runs `query` against the instance at `endpoint`, authenticating with `credential`.
///
/// All arguments are checked before any network activity. A fresh HTTP client
/// is built for every call.
pub fn run_query(endpoint: &str, query: &str, credential: &str) -> Result<QueryResult> {
    require_non_empty("endpoint", endpoint)?;
    require_non_empty("query", query)?;
    require_non_empty("credential", credential)?;

    QueryClient::new(ClientConfig::new(endpoint, credential))?.run_query(query)
}

/// Builds the query run URL for an instance base URL.
pub fn query_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), QUERY_RUN_PATH)
}

fn require_non_empty(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(QueryRunnerError::invalid_argument(format!(
            "{name} must be a non-empty string"
        )));
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
