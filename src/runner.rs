//! Run a query and save its results in one call.

use std::path::Path;

use crate::client::run_query;
use crate::error::Result;
use crate::persistence::save_query_results;

/// Runs `query` against `endpoint` and saves the result under `path`.
///
/// Writes `<path>.csv` and a `<path>.query` sidecar holding `query`. The first
/// error from either step is returned as is.
pub fn run_and_save_query(
    endpoint: &str,
    query: &str,
    credential: &str,
    path: impl AsRef<Path>,
) -> Result<()> {
    let result = run_query(endpoint, query, credential)?;
    save_query_results(&result, path, Some(query))
}
