//! Query result types.
//!
//! Defines the tabular structure returned by the query API and stored on disk.

mod value;

pub use value::Value;

use serde::Serialize;

use crate::error::{QueryRunnerError, Result};

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// Top-level response field added by the API for display only.
const TITLE_FIELD: &str = "title";

/// Represents the result of executing a query.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QueryResult {
    /// Column names, in result order.
    pub headers: Vec<String>,

    /// Rows of data. Each row has one value per header.
    #[serde(rename = "result")]
    pub rows: Vec<Row>,

    /// The query text that produced this result, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl QueryResult {
    /// Creates a new empty query result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query result with the given headers and rows.
    pub fn with_data(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            headers,
            rows,
            query: None,
        }
    }

    /// Attaches the originating query text.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns true if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Builds a result from a query API response body.
    ///
    /// Expects an object with a `headers` array of strings and a `result`
    /// (or `rows`) array of arrays. A top-level `title` is dropped. An optional string
    /// `query` field is kept.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(mut map) = value else {
            return Err(QueryRunnerError::invalid_argument(
                "query result must be a JSON object",
            ));
        };

        if map.remove(TITLE_FIELD).is_some() {
            tracing::debug!("Dropped '{}' field from query result", TITLE_FIELD);
        }

        let headers = match map.remove("headers") {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    serde_json::Value::String(s) => Ok(s),
                    other => Err(QueryRunnerError::invalid_argument(format!(
                        "header {i} is not a string: {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(QueryRunnerError::invalid_argument(
                    "'headers' must be an array",
                ))
            }
            None => {
                return Err(QueryRunnerError::invalid_argument(
                    "query result is missing 'headers'",
                ))
            }
        };

        let rows = match map.remove("result").or_else(|| map.remove("rows")) {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    serde_json::Value::Array(cells) => {
                        Ok(cells.into_iter().map(Value::from).collect())
                    }
                    other => Err(QueryRunnerError::invalid_argument(format!(
                        "row {i} is not an array: {other}"
                    ))),
                })
                .collect::<Result<Vec<Row>>>()?,
            // The API sends `null` for an empty result set
            Some(serde_json::Value::Null) => Vec::new(),
            Some(_) => {
                return Err(QueryRunnerError::invalid_argument(
                    "'result' must be an array of rows",
                ))
            }
            None => {
                return Err(QueryRunnerError::invalid_argument(
                    "query result is missing 'result' or 'rows'",
                ))
            }
        };

        let query = match map.remove("query") {
            Some(serde_json::Value::String(q)) => Some(q),
            _ => None,
        };

        Ok(Self {
            headers,
            rows,
            query,
        })
    }
}
