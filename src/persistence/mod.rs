//! On-disk storage for query results.
//!
//! A result saved under `path` is a CSV file at `<path>.csv` plus, when the
//! query text is known, a sidecar text file at `<path>.query`.

mod reader;
mod writer;

pub use reader::read_query_from_file;
pub use writer::{save_query_results, save_query_results_json};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{QueryRunnerError, Result};

/// Suffix of the tabular result file.
pub const CSV_SUFFIX: &str = ".csv";

/// Suffix of the sidecar file holding the query text.
pub const QUERY_SUFFIX: &str = ".query";

/// Returns the path of the CSV file for a result saved under `path`.
pub fn csv_path(path: &Path) -> PathBuf {
    with_suffix(path, CSV_SUFFIX)
}

/// Returns the path of the query sidecar for a result saved under `path`.
pub fn query_path(path: &Path) -> PathBuf {
    with_suffix(path, QUERY_SUFFIX)
}

/// Appends `suffix` to the final path component, keeping any existing extension.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

fn require_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(QueryRunnerError::invalid_argument(
            "path must be a non-empty string",
        ));
    }
    Ok(())
}
