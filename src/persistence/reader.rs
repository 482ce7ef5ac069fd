//! Loads query results saved by the writer.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use super::{csv_path, query_path, require_path};
use crate::error::{QueryRunnerError, Result};
use crate::result::{QueryResult, Row, Value};

/// Reads `<path>.csv` and, if present, `<path>.query` into a query result.
///
/// Field types are inferred with [`Value::infer`], so a string that looks
/// like a number comes back as a number. A missing `.query` file leaves
/// `query` unset.
pub fn read_query_from_file(path: impl AsRef<Path>) -> Result<QueryResult> {
    let path = path.as_ref();
    require_path(path)?;

    let csv_file = csv_path(path);
    let to_err = |e: csv::Error| QueryRunnerError::load(format!("{}: {e}", csv_file.display()));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&csv_file)
        .map_err(to_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(to_err)?
        .iter()
        .map(String::from)
        .collect();

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(Value::infer).collect::<Row>())
                .map_err(to_err)
        })
        .collect::<Result<Vec<Row>>>()?;

    let query = read_query_text(&query_path(path))?;

    debug!(
        "Loaded {} columns, {} rows from {}",
        headers.len(),
        rows.len(),
        csv_file.display()
    );

    Ok(QueryResult {
        headers,
        rows,
        query,
    })
}

fn read_query_text(file: &Path) -> Result<Option<String>> {
    match fs::read_to_string(file) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(QueryRunnerError::load(format!("{}: {e}", file.display()))),
    }
}
